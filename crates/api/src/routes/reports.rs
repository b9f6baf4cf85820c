//! Report routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use khata_core::tds::{TdsFilters, TdsReportService};
use khata_db::TdsRepository;
use tracing::info;

use crate::AppState;
use crate::error::{error_response, from_tds, from_tds_repository};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/tds-payable", get(get_tds_payable))
}

/// GET `/reports/tds-payable` - Tax withheld per supplier voucher.
async fn get_tds_payable(
    State(state): State<AppState>,
    Query(filters): Query<TdsFilters>,
) -> Response {
    if let Err(e) = filters.validate() {
        return error_response(&from_tds(e));
    }

    let repo = TdsRepository::new((*state.db).clone(), state.tax_id_field);
    let dataset = match repo.load_dataset(&filters).await {
        Ok(dataset) => dataset,
        Err(e) => return error_response(&from_tds_repository(e)),
    };

    match TdsReportService::build_report(&filters, &dataset, state.tax_id_field) {
        Ok(report) => {
            info!(
                from_date = %filters.from_date,
                to_date = %filters.to_date,
                rows = report.rows.len(),
                "TDS payable report generated"
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => error_response(&from_tds(e)),
    }
}
