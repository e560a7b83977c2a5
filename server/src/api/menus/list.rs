use crate::api::{access_denied, error_response, internal_error, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Menu;
use crate::schema::{menus, restaurants};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cocina_core::Actor;
use diesel::prelude::*;
use std::sync::Arc;

use super::MenuSummary;

fn menus_of(conn: &mut PgConnection, restaurant_id: i32) -> Response {
    match menus::table
        .filter(menus::restaurant_id.eq(restaurant_id))
        .order(menus::starts_at.asc())
        .select(Menu::as_select())
        .load::<Menu>(conn)
    {
        Ok(rows) => {
            let body: Vec<MenuSummary> = rows.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => internal_error("Failed to list menus", e),
    }
}

/// Menus of a restaurant owned by the calling administrator, by start date.
#[utoipa::path(
    get,
    path = "/menus/{id_restaurante}",
    tag = "menus",
    params(("id_restaurante" = i32, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Menus of the restaurant", body = Vec<MenuSummary>),
        (status = 403, description = "Not the owning administrator", body = ErrorResponse),
        (status = 404, description = "Restaurant not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_restaurant_menus(
    AuthUser(actor): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(restaurant_id): Path<i32>,
) -> impl IntoResponse {
    let Some(administrator_id) = actor.as_administrator() else {
        return access_denied();
    };

    let mut conn = get_conn!(pool);

    match restaurants::table
        .find(restaurant_id)
        .select(restaurants::administrator_id)
        .first::<i32>(&mut conn)
        .optional()
    {
        Ok(Some(owner)) if owner == administrator_id => menus_of(&mut conn, restaurant_id),
        Ok(Some(_)) => access_denied(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Restaurante no encontrado"),
        Err(e) => internal_error("Failed to load restaurant", e),
    }
}

/// Menus of the calling chef's restaurant.
#[utoipa::path(
    get,
    path = "/menus",
    tag = "menus",
    responses(
        (status = 200, description = "Menus of the chef's restaurant", body = Vec<MenuSummary>),
        (status = 403, description = "Caller is not a chef", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_own_restaurant_menus(
    AuthUser(actor): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let Actor::Chef { restaurant_id, .. } = actor else {
        return access_denied();
    };

    let mut conn = get_conn!(pool);
    menus_of(&mut conn, restaurant_id)
}
