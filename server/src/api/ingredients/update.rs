use crate::api::{error_response, internal_error, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{Ingredient, IngredientChanges};
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

use super::{
    validate_ingredient, IngredientRequest, IngredientResponse, DUPLICATE_NAME, NOT_FOUND,
};

#[utoipa::path(
    put,
    path = "/ingrediente/{id}",
    tag = "ingredients",
    params(("id" = i32, Path, description = "Ingredient ID")),
    request_body = IngredientRequest,
    responses(
        (status = 200, description = "Ingredient updated", body = IngredientResponse),
        (status = 400, description = "Invalid data or duplicate name", body = ErrorResponse),
        (status = 404, description = "Ingredient not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_ingredient(
    AuthUser(actor): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
    Json(req): Json<IngredientRequest>,
) -> impl IntoResponse {
    let fields = match validate_ingredient(&req) {
        Ok(f) => f,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, message),
    };

    let mut conn = get_conn!(pool);

    let result = diesel::update(
        ingredients::table
            .filter(ingredients::id.eq(id))
            .filter(ingredients::administrator_id.eq(actor.administrator_id())),
    )
    .set(IngredientChanges {
        name: &fields.name,
        unit: &fields.unit,
        unit_cost: fields.unit_cost,
        calories: fields.calories,
        site: &fields.site,
    })
    .returning(Ingredient::as_returning())
    .get_result(&mut conn)
    .optional();

    match result {
        Ok(Some(ingredient)) => {
            (StatusCode::OK, Json(IngredientResponse::from(ingredient))).into_response()
        }
        Ok(None) => error_response(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            error_response(StatusCode::BAD_REQUEST, DUPLICATE_NAME)
        }
        Err(e) => internal_error("Failed to update ingredient", e),
    }
}
