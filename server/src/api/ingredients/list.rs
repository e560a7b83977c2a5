use crate::api::{internal_error, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Ingredient;
use crate::schema::ingredients;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use std::sync::Arc;

use super::IngredientResponse;

/// Ingredients owned by the caller's administrator, by name.
#[utoipa::path(
    get,
    path = "/ingredientes",
    tag = "ingredients",
    responses(
        (status = 200, description = "Ingredient list", body = Vec<IngredientResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_ingredients(
    AuthUser(actor): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match ingredients::table
        .filter(ingredients::administrator_id.eq(actor.administrator_id()))
        .order(ingredients::name.asc())
        .select(Ingredient::as_select())
        .load::<Ingredient>(&mut conn)
    {
        Ok(rows) => {
            let body: Vec<IngredientResponse> = rows.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => internal_error("Failed to list ingredients", e),
    }
}
