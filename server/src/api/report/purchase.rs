use crate::api::{error_response, internal_error, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::store::PgStore;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use cocina_core::{
    aggregate_purchase_report, parse_report_request, LineItem, PurchaseReport, ReportError,
    ReportRequestEntry,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PurchaseReportRequest {
    #[serde(rename = "recetas", default)]
    pub recipes: Vec<ReportRequestEntry>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PurchaseReportResponse {
    pub mensaje: String,
    /// Totals keyed by ingredient name.
    pub ingredientes_receta: BTreeMap<String, LineItem>,
}

impl From<PurchaseReport> for PurchaseReportResponse {
    fn from(report: PurchaseReport) -> Self {
        Self {
            mensaje: "Cálculo correcto".to_string(),
            ingredientes_receta: report,
        }
    }
}

fn report_failure(error: ReportError<diesel::result::Error>) -> axum::response::Response {
    if error.is_client_error() {
        error_response(StatusCode::BAD_REQUEST, error.to_string())
    } else {
        internal_error("Failed to build purchase report", error)
    }
}

/// Ingredients to buy, with rounded-up quantities and costs, for cooking each
/// requested recipe for the given number of people.
#[utoipa::path(
    post,
    path = "/reporte",
    tag = "reports",
    request_body(content = PurchaseReportRequest, example = json!({
        "recetas": [{"receta": "3", "numero_personas": "20"}]
    })),
    responses(
        (status = 200, description = "Purchase report", body = PurchaseReportResponse),
        (status = 400, description = "Unknown recipe or invalid headcount", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn purchase_report(
    AuthUser(actor): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<PurchaseReportRequest>,
) -> impl IntoResponse {
    let lines = match parse_report_request(&req.recipes) {
        Ok(lines) => lines,
        Err(e) => return report_failure(e),
    };

    let mut conn = get_conn!(pool);
    let mut store = PgStore::scoped_to(&mut conn, actor.administrator_id());

    match aggregate_purchase_report(&mut store, &lines) {
        Ok(report) => (StatusCode::OK, Json(PurchaseReportResponse::from(report))).into_response(),
        Err(e) => report_failure(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_missing_list() {
        let req: PurchaseReportRequest = serde_json::from_str("{}").unwrap();
        assert!(req.recipes.is_empty());
    }

    #[test]
    fn test_response_shape() {
        let mut report = PurchaseReport::new();
        report.insert(
            "Harina".to_string(),
            LineItem {
                site: "Mercado".to_string(),
                quantity: 4,
                recipes: vec!["Pan".to_string()],
                cost: 8.0,
            },
        );

        let body = serde_json::to_value(PurchaseReportResponse::from(report)).unwrap();
        assert_eq!(body["mensaje"], "Cálculo correcto");
        assert_eq!(body["ingredientes_receta"]["Harina"]["cantidad"], 4);
        assert_eq!(body["ingredientes_receta"]["Harina"]["sitio"], "Mercado");
    }

    #[test]
    fn test_unknown_recipe_is_bad_request() {
        let response = report_failure(ReportError::UnknownRecipe {
            reference: "abc".to_string(),
        });
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_oversized_totals_are_bad_request() {
        let response = report_failure(ReportError::QuantityOutOfRange {
            ingredient: "Sal".to_string(),
        });
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_store_failure_is_internal_error() {
        let response = report_failure(ReportError::Store(diesel::result::Error::NotFound));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
