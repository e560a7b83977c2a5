use crate::api::ErrorResponse;
use crate::db::DbPool;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use cocina_core::Actor;
use std::sync::Arc;
use thiserror::Error;

use super::db::get_actor_from_token;

/// Resolved caller of an authenticated endpoint.
pub struct AuthUser(pub Actor);

#[derive(Debug, Error, PartialEq)]
pub enum AuthError {
    #[error("Falta el encabezado Authorization")]
    MissingHeader,
    #[error("Encabezado Authorization inválido")]
    MalformedHeader,
    #[error("Token inválido o expirado")]
    InvalidToken,
    #[error("No se pudo verificar la sesión")]
    Unavailable,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthError::Unavailable => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        };
        (
            status,
            Json(ErrorResponse {
                mensaje: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Pulls the bearer token out of an `Authorization` header value.
fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let value = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MalformedHeader)
}

impl<S> FromRequestParts<S> for AuthUser
where
    Arc<DbPool>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let pool = Arc::<DbPool>::from_ref(state);

        match get_actor_from_token(&pool, token).await {
            Ok(Some(actor)) => Ok(AuthUser(actor)),
            Ok(None) => Err(AuthError::InvalidToken),
            Err(e) => {
                tracing::error!("Failed to look up session: {}", e);
                Err(AuthError::Unavailable)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header_value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/usuario");
        if let Some(value) = header_value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_extracted() {
        let parts = parts_with(Some("Bearer abc123"));
        assert_eq!(bearer_token(&parts), Ok("abc123"));
    }

    #[test]
    fn test_missing_header() {
        let parts = parts_with(None);
        assert_eq!(bearer_token(&parts), Err(AuthError::MissingHeader));
    }

    #[test]
    fn test_wrong_scheme() {
        let parts = parts_with(Some("Basic dXNlcjpwYXNz"));
        assert_eq!(bearer_token(&parts), Err(AuthError::MalformedHeader));
        let parts = parts_with(Some("Bearer "));
        assert_eq!(bearer_token(&parts), Err(AuthError::MalformedHeader));
    }

    #[test]
    fn test_rejection_is_unauthorized() {
        let response = AuthError::InvalidToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_lookup_failure_is_server_error() {
        let response = AuthError::Unavailable.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
