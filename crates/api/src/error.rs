//! Mapping of domain errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use khata_core::settings::SettingsError;
use khata_core::tds::TdsError;
use khata_db::TdsRepositoryError;
use khata_shared::AppError;
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

/// Converts an application error into a JSON error response.
pub fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        error!(error = %err, "Request failed");
        return (
            status,
            Json(json!({
                "error": err.error_code(),
                "message": "An error occurred"
            })),
        )
            .into_response();
    }

    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.message()
        })),
    )
        .into_response()
}

/// Maps a report error.
pub fn from_tds(err: TdsError) -> AppError {
    match err {
        TdsError::InvalidDateRange { .. } => AppError::Validation(err.to_string()),
    }
}

/// Maps a report storage error.
pub fn from_tds_repository(err: TdsRepositoryError) -> AppError {
    AppError::Database(err.to_string())
}

/// Maps a settings error.
pub fn from_settings(err: SettingsError) -> AppError {
    AppError::Database(err.to_string())
}

/// Maps a raw database error.
pub fn from_db(err: DbErr) -> AppError {
    AppError::Database(err.to_string())
}
