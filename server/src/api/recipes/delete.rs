use crate::api::{error_response, internal_error, ErrorResponse, MessageResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::recipes;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use std::sync::Arc;

use super::NOT_FOUND;

/// Deletes a recipe with its lines. Menus lose the recipe as well.
#[utoipa::path(
    delete,
    path = "/receta/{id}",
    tag = "recipes",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe deleted", body = MessageResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_recipe(
    AuthUser(actor): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let result = diesel::delete(
        recipes::table
            .filter(recipes::id.eq(id))
            .filter(recipes::administrator_id.eq(actor.administrator_id())),
    )
    .execute(&mut conn);

    match result {
        Ok(0) => error_response(StatusCode::NOT_FOUND, NOT_FOUND),
        Ok(_) => (
            StatusCode::OK,
            Json(MessageResponse::new("Receta eliminada exitosamente")),
        )
            .into_response(),
        Err(e) => internal_error("Failed to delete recipe", e),
    }
}
