use crate::api::{access_denied, internal_error, ErrorResponse};
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

use super::RestaurantResponse;

/// Restaurants owned by the calling administrator.
#[utoipa::path(
    get,
    path = "/restaurantes/{id_usuario}",
    tag = "restaurants",
    params(("id_usuario" = i32, Path, description = "Administrator user ID")),
    responses(
        (status = 200, description = "Restaurant list", body = Vec<RestaurantResponse>),
        (status = 403, description = "Access denied", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_restaurants(
    AuthUser(actor): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(user_id): Path<i32>,
) -> impl IntoResponse {
    if actor.as_administrator() != Some(user_id) {
        return access_denied();
    }

    let mut conn = get_conn!(pool);

    match restaurants::table
        .filter(restaurants::administrator_id.eq(user_id))
        .order(restaurants::name.asc())
        .select(Restaurant::as_select())
        .load::<Restaurant>(&mut conn)
    {
        Ok(rows) => {
            let body: Vec<RestaurantResponse> = rows.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => internal_error("Failed to list restaurants", e),
    }
}
