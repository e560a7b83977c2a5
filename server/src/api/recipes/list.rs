use crate::api::{access_denied, error_response, internal_error, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Recipe;
use crate::schema::recipes;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use std::sync::Arc;

use super::{administrator_of_user, with_lines, RecipeResponse};

/// Recipes of the administrator behind `id_usuario`, which must be the
/// caller's own administrator.
#[utoipa::path(
    get,
    path = "/recetas/{id_usuario}",
    tag = "recipes",
    params(("id_usuario" = i32, Path, description = "Administrator or chef user ID")),
    responses(
        (status = 200, description = "Recipe list", body = Vec<RecipeResponse>),
        (status = 403, description = "Access denied", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_recipes(
    AuthUser(actor): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(user_id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let administrator_id = match administrator_of_user(&mut conn, user_id) {
        Ok(Some(id)) if id == actor.administrator_id() => id,
        Ok(Some(_)) => return access_denied(),
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "Usuario no encontrado"),
        Err(e) => return internal_error("Failed to resolve recipe owner", e),
    };

    let result = recipes::table
        .filter(recipes::administrator_id.eq(administrator_id))
        .order(recipes::name.asc())
        .select(Recipe::as_select())
        .load::<Recipe>(&mut conn)
        .and_then(|rows| with_lines(&mut conn, rows));

    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => internal_error("Failed to list recipes", e),
    }
}
