//! Buying settings routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use khata_core::settings::{BuyingSettings, BuyingSettingsService};
use khata_db::{DefaultsRepository, NamingRuleRepository};
use sea_orm::TransactionTrait;
use tracing::info;

use crate::AppState;
use crate::error::{error_response, from_db, from_settings};

/// Creates the settings routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/settings/buying",
        get(get_buying_settings).put(update_buying_settings),
    )
}

/// GET `/settings/buying` - Current buying defaults.
async fn get_buying_settings(State(state): State<AppState>) -> Response {
    let store = DefaultsRepository::new(state.db.as_ref());
    match BuyingSettingsService::load(&store).await {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(e) => error_response(&from_settings(e)),
    }
}

/// PUT `/settings/buying` - Validate and store buying settings.
///
/// The defaults and the supplier naming rule are written in one transaction.
async fn update_buying_settings(
    State(state): State<AppState>,
    Json(settings): Json<BuyingSettings>,
) -> Response {
    let txn = match state.db.begin().await {
        Ok(txn) => txn,
        Err(e) => return error_response(&from_db(e)),
    };

    let store = DefaultsRepository::new(&txn);
    let naming = NamingRuleRepository::new(&txn);
    if let Err(e) = BuyingSettingsService::validate(&settings, &store, &naming).await {
        // Dropping the transaction rolls it back.
        return error_response(&from_settings(e));
    }

    if let Err(e) = txn.commit().await {
        return error_response(&from_db(e));
    }

    info!(
        supplier_group = ?settings.supplier_group,
        by_naming_series = settings.names_by_series(),
        "Buying settings updated"
    );
    (StatusCode::OK, Json(settings)).into_response()
}
