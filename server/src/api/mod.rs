pub mod chefs;
pub mod ingredients;
pub mod menus;
pub mod public;
pub mod recipes;
pub mod report;
pub mod restaurants;
pub mod users;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cocina_core::ValidationError;
use serde::Serialize;
use std::fmt::Display;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub mensaje: String,
}

/// Body for writes that only confirm success.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub mensaje: String,
}

impl MessageResponse {
    pub fn new(mensaje: impl Into<String>) -> Self {
        Self {
            mensaje: mensaje.into(),
        }
    }
}

/// Confirmation body for writes that only report success and the new id.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub mensaje: String,
    pub id: i32,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            mensaje: message.into(),
        }),
    )
        .into_response()
}

pub fn access_denied() -> Response {
    error_response(StatusCode::FORBIDDEN, ValidationError::AccessDenied.to_string())
}

/// Logs an unexpected failure and hides its details from the client.
pub fn internal_error(context: &str, error: impl Display) -> Response {
    tracing::error!("{}: {}", context, error);
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Error interno del servidor",
    )
}

pub fn rejection_status(reason: &ValidationError) -> StatusCode {
    match reason {
        ValidationError::AccessDenied => StatusCode::FORBIDDEN,
        _ => StatusCode::BAD_REQUEST,
    }
}

pub fn rejection_response(reason: &ValidationError) -> Response {
    error_response(rejection_status(reason), reason.to_string())
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components and security
    #[derive(OpenApi)]
    #[openapi(
        info(title = "cocina", description = "Restaurant menus, recipes and purchase reports"),
        components(schemas(ErrorResponse, MessageResponse, CreatedResponse))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        public::ApiDoc::openapi(),
        users::ApiDoc::openapi(),
        ingredients::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        restaurants::ApiDoc::openapi(),
        chefs::ApiDoc::openapi(),
        menus::ApiDoc::openapi(),
        report::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_rejection_maps_to_bad_request_with_message() {
        let response = rejection_response(&ValidationError::OverlappingMenu);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "mensaje": "Ya existe un menú con fechas superpuestas en este restaurante"
            })
        );
    }

    #[test]
    fn test_access_denied_is_forbidden() {
        assert_eq!(
            rejection_status(&ValidationError::AccessDenied),
            StatusCode::FORBIDDEN
        );
        assert_eq!(access_denied().status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = internal_error("Failed to load menus", "connection reset");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(!body["mensaje"].as_str().unwrap().contains("connection reset"));
    }

    #[test]
    fn test_openapi_lists_core_routes() {
        let spec = openapi();
        assert!(spec.paths.paths.contains_key("/menu"));
        assert!(spec.paths.paths.contains_key("/reporte"));
        assert!(spec.paths.paths.contains_key("/login"));
    }
}
