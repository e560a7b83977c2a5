use crate::api::{error_response, internal_error, ErrorResponse};
use crate::auth::hash_password;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{NewUser, ROLE_ADMIN};
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::CredentialsRequest;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SigninResponse {
    pub mensaje: String,
    pub id: i32,
}

/// Registers a new administrator account.
#[utoipa::path(
    post,
    path = "/signin",
    tag = "auth",
    request_body(content = CredentialsRequest, example = json!({"usuario": "ana", "contrasena": "secreto"})),
    responses(
        (status = 200, description = "Administrator created", body = SigninResponse),
        (status = 400, description = "Invalid credentials format", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse)
    )
)]
pub async fn signin(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<CredentialsRequest>,
) -> impl IntoResponse {
    let Some(username) = req.normalized_username() else {
        return error_response(StatusCode::BAD_REQUEST, "Usuario inválido");
    };
    if req.password.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Contraseña inválida");
    }

    let password_hash = match hash_password(&req.password) {
        Ok(h) => h,
        Err(e) => return internal_error("Failed to hash password", e),
    };

    let mut conn = get_conn!(pool);

    let result = diesel::insert_into(users::table)
        .values(NewUser {
            username,
            password_hash: &password_hash,
            role: ROLE_ADMIN,
        })
        .returning(users::id)
        .get_result::<i32>(&mut conn);

    match result {
        Ok(id) => {
            tracing::info!(user_id = id, "administrator registered");
            (
                StatusCode::OK,
                Json(SigninResponse {
                    mensaje: "Usuario creado exitosamente".to_string(),
                    id,
                }),
            )
                .into_response()
        }
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            error_response(StatusCode::CONFLICT, "El usuario ya existe")
        }
        Err(e) => internal_error("Failed to create user", e),
    }
}
