use crate::api::{
    access_denied, error_response, internal_error, CreatedResponse, ErrorResponse,
};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::RestaurantChanges;
use crate::schema::restaurants;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::sync::Arc;

use super::{validate_restaurant, RestaurantRequest, DUPLICATE_NAME, NOT_FOUND};

#[utoipa::path(
    put,
    path = "/restaurante/{id}",
    tag = "restaurants",
    params(("id" = i32, Path, description = "Restaurant ID")),
    request_body = RestaurantRequest,
    responses(
        (status = 200, description = "Restaurant updated", body = CreatedResponse),
        (status = 400, description = "Invalid data or duplicate name", body = ErrorResponse),
        (status = 403, description = "Not the owning administrator", body = ErrorResponse),
        (status = 404, description = "Restaurant not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_restaurant(
    AuthUser(actor): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
    Json(req): Json<RestaurantRequest>,
) -> impl IntoResponse {
    let Some(administrator_id) = actor.as_administrator() else {
        return access_denied();
    };

    let fields = match validate_restaurant(&req) {
        Ok(f) => f,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, message),
    };

    let mut conn = get_conn!(pool);

    match restaurants::table
        .find(id)
        .select(restaurants::administrator_id)
        .first::<i32>(&mut conn)
        .optional()
    {
        Ok(Some(owner)) if owner == administrator_id => {}
        Ok(Some(_)) => return access_denied(),
        Ok(None) => return error_response(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(e) => return internal_error("Failed to load restaurant", e),
    }

    let result = diesel::update(restaurants::table.find(id))
        .set(RestaurantChanges {
            name: &fields.name,
            address: &fields.address,
            phone: &fields.phone,
            social_media: &fields.social_media,
            opening_hours: &fields.opening_hours,
            cuisine: &fields.cuisine,
            delivery_apps: &fields.delivery_apps,
            service_options: &fields.service_options,
        })
        .execute(&mut conn);

    match result {
        Ok(_) => (
            StatusCode::OK,
            Json(CreatedResponse {
                mensaje: "Restaurante actualizado exitosamente".to_string(),
                id,
            }),
        )
            .into_response(),
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            error_response(StatusCode::BAD_REQUEST, DUPLICATE_NAME)
        }
        Err(e) => internal_error("Failed to update restaurant", e),
    }
}
