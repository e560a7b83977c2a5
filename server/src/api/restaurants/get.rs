use crate::api::{error_response, internal_error, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Restaurant;
use crate::schema::restaurants;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use std::sync::Arc;

use super::{RestaurantResponse, NOT_FOUND};

#[utoipa::path(
    get,
    path = "/restaurante/{id}",
    tag = "restaurants",
    params(("id" = i32, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Restaurant", body = RestaurantResponse),
        (status = 404, description = "Restaurant not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_restaurant(
    AuthUser(_actor): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match restaurants::table
        .find(id)
        .select(Restaurant::as_select())
        .first(&mut conn)
        .optional()
    {
        Ok(Some(r)) => (StatusCode::OK, Json(RestaurantResponse::from(r))).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(e) => internal_error("Failed to load restaurant", e),
    }
}
