//! In-memory settings store.

use async_trait::async_trait;
use dashmap::DashMap;

use super::error::SettingsError;
use super::store::{NamingSeriesConfigurator, SettingsStore};
use super::types::NamingRule;

/// Defaults and naming rules kept in memory.
#[derive(Debug, Default)]
pub struct InMemorySettings {
    defaults: DashMap<String, String>,
    naming_rules: DashMap<String, NamingRule>,
}

impl InMemorySettings {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the naming rule last applied to `doctype`.
    #[must_use]
    pub fn naming_rule(&self, doctype: &str) -> Option<NamingRule> {
        self.naming_rules.get(doctype).map(|rule| rule.clone())
    }
}

#[async_trait]
impl SettingsStore for InMemorySettings {
    async fn get_default(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.defaults.get(key).map(|value| value.clone()))
    }

    async fn set_default(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.defaults.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[async_trait]
impl NamingSeriesConfigurator for InMemorySettings {
    async fn set_by_naming_series(&self, rule: &NamingRule) -> Result<(), SettingsError> {
        self.naming_rules.insert(rule.doctype.clone(), rule.clone());
        Ok(())
    }
}
