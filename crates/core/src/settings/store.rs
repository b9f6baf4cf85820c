//! Storage seams for settings.
//!
//! Defaults are explicit state passed to callers, never ambient globals.

use async_trait::async_trait;

use super::error::SettingsError;
use super::types::NamingRule;

/// Read/write access to process-wide default values.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get_default(&self, key: &str) -> Result<Option<String>, SettingsError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set_default(&self, key: &str, value: &str) -> Result<(), SettingsError>;
}

/// Switches a record type between naming-series and field-based naming.
#[async_trait]
pub trait NamingSeriesConfigurator: Send + Sync {
    /// Applies the naming rule to its record type.
    async fn set_by_naming_series(&self, rule: &NamingRule) -> Result<(), SettingsError>;
}
