//! TDS report error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during TDS report generation.
#[derive(Debug, Error)]
pub enum TdsError {
    /// The date range is inverted.
    #[error("From Date must be before To Date (from {from_date}, to {to_date})")]
    InvalidDateRange {
        /// Start of the reporting period.
        from_date: NaiveDate,
        /// End of the reporting period.
        to_date: NaiveDate,
    },
}
