pub mod me;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

pub fn router() -> Router<AppState> {
    Router::new().route("/usuario", get(me::get_current_user))
}

#[derive(OpenApi)]
#[openapi(paths(me::get_current_user), components(schemas(me::CurrentUserResponse)))]
pub struct ApiDoc;
