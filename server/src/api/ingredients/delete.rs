use crate::api::{error_response, internal_error, ErrorResponse, MessageResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::ingredients;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::sync::Arc;

use super::NOT_FOUND;

/// Deletes an ingredient. Ingredients still referenced by a recipe are kept.
#[utoipa::path(
    delete,
    path = "/ingrediente/{id}",
    tag = "ingredients",
    params(("id" = i32, Path, description = "Ingredient ID")),
    responses(
        (status = 200, description = "Ingredient deleted", body = MessageResponse),
        (status = 404, description = "Ingredient not found", body = ErrorResponse),
        (status = 409, description = "Ingredient used by a recipe", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_ingredient(
    AuthUser(actor): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    // recipe_ingredients references ingredients without cascade
    let result = diesel::delete(
        ingredients::table
            .filter(ingredients::id.eq(id))
            .filter(ingredients::administrator_id.eq(actor.administrator_id())),
    )
    .execute(&mut conn);

    match result {
        Ok(0) => error_response(StatusCode::NOT_FOUND, NOT_FOUND),
        Ok(_) => (
            StatusCode::OK,
            Json(MessageResponse::new("Ingrediente eliminado exitosamente")),
        )
            .into_response(),
        Err(DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)) => {
            error_response(
                StatusCode::CONFLICT,
                "El ingrediente se está usando en diferentes recetas",
            )
        }
        Err(e) => internal_error("Failed to delete ingredient", e),
    }
}
