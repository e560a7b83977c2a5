pub mod purchase;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

pub fn router() -> Router<AppState> {
    Router::new().route("/reporte", post(purchase::purchase_report))
}

#[derive(OpenApi)]
#[openapi(
    paths(purchase::purchase_report),
    components(schemas(
        purchase::PurchaseReportRequest,
        purchase::PurchaseReportResponse,
        cocina_core::ReportRequestEntry,
        cocina_core::LineItem,
    ))
)]
pub struct ApiDoc;
