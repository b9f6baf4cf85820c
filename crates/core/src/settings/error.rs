//! Settings error types.

use thiserror::Error;

/// Errors raised while reading or writing settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The defaults store failed.
    #[error("Settings store error: {0}")]
    Store(String),

    /// The naming rule could not be applied.
    #[error("Naming rule error: {0}")]
    NamingRule(String),
}
