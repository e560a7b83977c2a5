use crate::api::{error_response, internal_error, ErrorResponse};
use crate::auth::{create_session, verify_password, SessionTtl};
use crate::db::DbPool;
use crate::get_conn;
use crate::models::User;
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::CredentialsRequest;

const INVALID_CREDENTIALS: &str = "Usuario o contraseña incorrectos";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub mensaje: String,
    pub token: String,
    pub id: i32,
    /// `admin` or `chef`.
    pub rol: String,
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body(content = CredentialsRequest, example = json!({"usuario": "ana", "contrasena": "secreto"})),
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(pool): State<Arc<DbPool>>,
    State(ttl): State<SessionTtl>,
    Json(req): Json<CredentialsRequest>,
) -> impl IntoResponse {
    let Some(username) = req.normalized_username() else {
        return error_response(StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS);
    };

    let mut conn = get_conn!(pool);

    let user: User = match users::table
        .filter(users::username.eq(username))
        .select(User::as_select())
        .first(&mut conn)
        .optional()
    {
        Ok(Some(u)) => u,
        Ok(None) => return error_response(StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS),
        Err(e) => return internal_error("Failed to load user", e),
    };

    if !verify_password(&req.password, &user.password_hash) {
        return error_response(StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS);
    }

    let token = match create_session(&mut conn, user.id, ttl) {
        Ok(t) => t,
        Err(e) => return internal_error("Failed to create session", e),
    };

    (
        StatusCode::OK,
        Json(LoginResponse {
            mensaje: "Inicio de sesión exitoso".to_string(),
            token,
            id: user.id,
            rol: user.role,
        }),
    )
        .into_response()
}
