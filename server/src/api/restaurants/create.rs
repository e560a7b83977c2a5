use crate::api::{
    access_denied, error_response, internal_error, CreatedResponse, ErrorResponse,
};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::NewRestaurant;
use crate::schema::restaurants;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::sync::Arc;

use super::{validate_restaurant, RestaurantRequest, DUPLICATE_NAME};

#[utoipa::path(
    post,
    path = "/restaurante",
    tag = "restaurants",
    request_body = RestaurantRequest,
    responses(
        (status = 201, description = "Restaurant created", body = CreatedResponse),
        (status = 400, description = "Invalid data or duplicate name", body = ErrorResponse),
        (status = 403, description = "Only administrators create restaurants", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_restaurant(
    AuthUser(actor): AuthUser,
    State(pool): State<Arc<DbPool>>,
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

    let result = diesel::insert_into(restaurants::table)
        .values(NewRestaurant {
            name: &fields.name,
            address: &fields.address,
            phone: &fields.phone,
            social_media: &fields.social_media,
            opening_hours: &fields.opening_hours,
            cuisine: &fields.cuisine,
            delivery_apps: &fields.delivery_apps,
            service_options: &fields.service_options,
            administrator_id,
        })
        .returning(restaurants::id)
        .get_result::<i32>(&mut conn);

    match result {
        Ok(id) => {
            tracing::info!(restaurant_id = id, administrator_id, "restaurant created");
            (
                StatusCode::CREATED,
                Json(CreatedResponse {
                    mensaje: "Restaurante creado exitosamente".to_string(),
                    id,
                }),
            )
                .into_response()
        }
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            error_response(StatusCode::BAD_REQUEST, DUPLICATE_NAME)
        }
        Err(e) => internal_error("Failed to create restaurant", e),
    }
}
