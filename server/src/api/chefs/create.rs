use crate::api::{
    access_denied, error_response, internal_error, CreatedResponse, ErrorResponse,
};
use crate::auth::{hash_password, AuthUser};
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{Chef, NewUser, ROLE_CHEF};
use crate::schema::{chefs, restaurants, users};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::sync::Arc;

use super::{validate_chef, CreateChefRequest};

/// Creates a chef login bound to one of the caller's restaurants.
#[utoipa::path(
    post,
    path = "/chefs",
    tag = "chefs",
    request_body = CreateChefRequest,
    responses(
        (status = 201, description = "Chef created", body = CreatedResponse),
        (status = 400, description = "Invalid data or username taken", body = ErrorResponse),
        (status = 403, description = "Only administrators create chefs", body = ErrorResponse),
        (status = 404, description = "Restaurant not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_chef(
    AuthUser(actor): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<CreateChefRequest>,
) -> impl IntoResponse {
    let Some(administrator_id) = actor.as_administrator() else {
        return access_denied();
    };

    let fields = match validate_chef(&req) {
        Ok(f) => f,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, message),
    };

    let mut conn = get_conn!(pool);

    match restaurants::table
        .filter(restaurants::id.eq(fields.restaurant_id))
        .filter(restaurants::administrator_id.eq(administrator_id))
        .select(restaurants::id)
        .first::<i32>(&mut conn)
        .optional()
    {
        Ok(Some(_)) => {}
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "Restaurante no encontrado"),
        Err(e) => return internal_error("Failed to load restaurant", e),
    }

    let password_hash = match hash_password(&fields.password) {
        Ok(h) => h,
        Err(e) => return internal_error("Failed to hash password", e),
    };

    let result: Result<i32, DieselError> = conn.transaction(|conn| {
        let user_id: i32 = diesel::insert_into(users::table)
            .values(NewUser {
                username: &fields.username,
                password_hash: &password_hash,
                role: ROLE_CHEF,
            })
            .returning(users::id)
            .get_result(conn)?;

        diesel::insert_into(chefs::table)
            .values(Chef {
                user_id,
                name: fields.name.clone(),
                restaurant_id: fields.restaurant_id,
            })
            .execute(conn)?;

        Ok(user_id)
    });

    match result {
        Ok(id) => {
            tracing::info!(
                chef_id = id,
                restaurant_id = fields.restaurant_id,
                "chef created"
            );
            (
                StatusCode::CREATED,
                Json(CreatedResponse {
                    mensaje: "Chef creado exitosamente".to_string(),
                    id,
                }),
            )
                .into_response()
        }
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            error_response(StatusCode::BAD_REQUEST, "El usuario ya existe")
        }
        Err(e) => internal_error("Failed to create chef", e),
    }
}
