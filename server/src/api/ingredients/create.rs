use crate::api::{error_response, internal_error, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{Ingredient, NewIngredient};
use crate::schema::ingredients;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::sync::Arc;

use super::{validate_ingredient, IngredientRequest, IngredientResponse, DUPLICATE_NAME};

#[utoipa::path(
    post,
    path = "/ingredientes",
    tag = "ingredients",
    request_body = IngredientRequest,
    responses(
        (status = 201, description = "Ingredient created", body = IngredientResponse),
        (status = 400, description = "Invalid data or duplicate name", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_ingredient(
    AuthUser(actor): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<IngredientRequest>,
) -> impl IntoResponse {
    let fields = match validate_ingredient(&req) {
        Ok(f) => f,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, message),
    };

    let mut conn = get_conn!(pool);

    let result = diesel::insert_into(ingredients::table)
        .values(NewIngredient {
            name: &fields.name,
            unit: &fields.unit,
            unit_cost: fields.unit_cost,
            calories: fields.calories,
            site: &fields.site,
            administrator_id: actor.administrator_id(),
        })
        .returning(Ingredient::as_returning())
        .get_result(&mut conn);

    match result {
        Ok(ingredient) => (
            StatusCode::CREATED,
            Json(IngredientResponse::from(ingredient)),
        )
            .into_response(),
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            error_response(StatusCode::BAD_REQUEST, DUPLICATE_NAME)
        }
        Err(e) => internal_error("Failed to create ingredient", e),
    }
}
