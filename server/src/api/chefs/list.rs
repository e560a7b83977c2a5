use crate::api::{access_denied, error_response, internal_error, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::{chefs, restaurants, users};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use std::sync::Arc;

use super::ChefResponse;

#[utoipa::path(
    get,
    path = "/chefs/{id_restaurante}",
    tag = "chefs",
    params(("id_restaurante" = i32, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Chefs of the restaurant", body = Vec<ChefResponse>),
        (status = 403, description = "Not the owning administrator", body = ErrorResponse),
        (status = 404, description = "Restaurant not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_chefs(
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
        Ok(Some(owner)) if owner == administrator_id => {}
        Ok(Some(_)) => return access_denied(),
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "Restaurante no encontrado"),
        Err(e) => return internal_error("Failed to load restaurant", e),
    }

    let rows: Result<Vec<(i32, String, String, i32)>, _> = chefs::table
        .inner_join(users::table)
        .filter(chefs::restaurant_id.eq(restaurant_id))
        .order(chefs::name.asc())
        .select((chefs::user_id, chefs::name, users::username, chefs::restaurant_id))
        .load(&mut conn);

    match rows {
        Ok(rows) => {
            let body: Vec<ChefResponse> = rows
                .into_iter()
                .map(|(id, nombre, usuario, restaurante_id)| ChefResponse {
                    id,
                    nombre,
                    usuario,
                    restaurante_id,
                })
                .collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => internal_error("Failed to list chefs", e),
    }
}
