use crate::api::{error_response, internal_error, ErrorResponse};
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

use super::{with_lines, RecipeResponse, NOT_FOUND};

#[utoipa::path(
    get,
    path = "/receta/{id}",
    tag = "recipes",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe with its ingredient lines", body = RecipeResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_recipe(
    AuthUser(actor): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let recipe = match recipes::table
        .filter(recipes::id.eq(id))
        .filter(recipes::administrator_id.eq(actor.administrator_id()))
        .select(Recipe::as_select())
        .first(&mut conn)
        .optional()
    {
        Ok(Some(r)) => r,
        Ok(None) => return error_response(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(e) => return internal_error("Failed to load recipe", e),
    };

    match with_lines(&mut conn, vec![recipe]) {
        Ok(mut found) => match found.pop() {
            Some(body) => (StatusCode::OK, Json(body)).into_response(),
            None => error_response(StatusCode::NOT_FOUND, NOT_FOUND),
        },
        Err(e) => internal_error("Failed to load recipe lines", e),
    }
}
