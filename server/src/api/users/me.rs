use crate::api::{error_response, internal_error, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::{chefs, users};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use cocina_core::Actor;
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CurrentUserResponse {
    pub nombre: String,
}

/// Display name of the caller: login name for administrators, chef name for chefs.
#[utoipa::path(
    get,
    path = "/usuario",
    tag = "users",
    responses(
        (status = 200, description = "Current user", body = CurrentUserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_current_user(
    AuthUser(actor): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let name = match actor {
        Actor::Administrator { id } => users::table
            .find(id)
            .select(users::username)
            .first::<String>(&mut conn)
            .optional(),
        Actor::Chef { id, .. } => chefs::table
            .find(id)
            .select(chefs::name)
            .first::<String>(&mut conn)
            .optional(),
    };

    match name {
        Ok(Some(nombre)) => (StatusCode::OK, Json(CurrentUserResponse { nombre })).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Usuario no encontrado"),
        Err(e) => internal_error("Failed to load current user", e),
    }
}
