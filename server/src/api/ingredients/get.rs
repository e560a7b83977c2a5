use crate::api::{error_response, internal_error, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Ingredient;
use crate::schema::ingredients;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use std::sync::Arc;

use super::{IngredientResponse, NOT_FOUND};

#[utoipa::path(
    get,
    path = "/ingrediente/{id}",
    tag = "ingredients",
    params(("id" = i32, Path, description = "Ingredient ID")),
    responses(
        (status = 200, description = "Ingredient", body = IngredientResponse),
        (status = 404, description = "Ingredient not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_ingredient(
    AuthUser(actor): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match ingredients::table
        .filter(ingredients::id.eq(id))
        .filter(ingredients::administrator_id.eq(actor.administrator_id()))
        .select(Ingredient::as_select())
        .first(&mut conn)
        .optional()
    {
        Ok(Some(ingredient)) => {
            (StatusCode::OK, Json(IngredientResponse::from(ingredient))).into_response()
        }
        Ok(None) => error_response(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(e) => internal_error("Failed to load ingredient", e),
    }
}
