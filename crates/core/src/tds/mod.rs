//! Tax Deducted at Source (TDS) payable report.
//!
//! This module provides pure business logic for the report:
//! - Filter validation
//! - Ledger entry selection criteria
//! - Column schema resolution
//! - Per-voucher aggregation of deducted and credited amounts

pub mod columns;
pub mod error;
pub mod query;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use columns::build_columns;
pub use error::TdsError;
pub use query::{EntryScope, TdsEntryQuery};
pub use service::TdsReportService;
pub use types::*;
