pub mod auth;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for public endpoints (no auth required)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signin", post(auth::signin::signin))
        .route("/login", post(auth::login::login))
}

#[derive(OpenApi)]
#[openapi(
    paths(auth::login::login, auth::signin::signin),
    components(schemas(
        auth::CredentialsRequest,
        auth::login::LoginResponse,
        auth::signin::SigninResponse,
    ))
)]
pub struct ApiDoc;
