use crate::api::{
    error_response, internal_error, rejection_response, CreatedResponse, ErrorResponse,
};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::store::PgStore;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Local;
use cocina_core::{MenuError, MenuPayload, ValidationError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::sync::Arc;

/// Creates a menu after validating its fields, schedule and recipes.
///
/// Validation and insert share one serializable transaction, so two
/// overlapping menus submitted at the same time cannot both be stored.
#[utoipa::path(
    post,
    path = "/menu",
    tag = "menus",
    request_body(content = MenuPayload, example = json!({
        "nombre": "Almuerzo ejecutivo",
        "descripcion": "Menú de mediodía",
        "fecha_inicio": "2026-11-01 12:00",
        "fecha_fin": "2026-11-01 16:00",
        "recetas": [{"receta": "3", "numero_personas": "20"}],
        "restaurante": 1
    })),
    responses(
        (status = 201, description = "Menu created", body = CreatedResponse),
        (status = 400, description = "Menu rejected", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Restaurant not owned by the caller", body = ErrorResponse),
        (status = 409, description = "Concurrent menu creation, retry", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_menu(
    AuthUser(actor): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(payload): Json<MenuPayload>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);
    let now = Local::now().naive_local();

    let outcome: Result<Result<i32, ValidationError>, DieselError> = conn
        .build_transaction()
        .serializable()
        .run(|conn| {
            let mut store = PgStore::new(conn);
            match cocina_core::create_menu(&mut store, &actor, &payload, now) {
                Ok(id) => Ok(Ok(id)),
                Err(MenuError::Rejected(reason)) => Ok(Err(reason)),
                Err(MenuError::Store(e)) => Err(e),
            }
        });

    match outcome {
        Ok(Ok(id)) => (
            StatusCode::CREATED,
            Json(CreatedResponse {
                mensaje: "Menu creado exitosamente".to_string(),
                id,
            }),
        )
            .into_response(),
        Ok(Err(reason)) => rejection_response(&reason),
        Err(DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, _)) => {
            tracing::warn!("Menu creation lost a serialization race");
            error_response(
                StatusCode::CONFLICT,
                "Otro menú se está creando para este restaurante, intente de nuevo",
            )
        }
        // Lost a race on the (restaurant, name) unique key
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            rejection_response(&ValidationError::DuplicateMenuName)
        }
        Err(e) => internal_error("Failed to create menu", e),
    }
}
