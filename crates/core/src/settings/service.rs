//! Buying settings service.

use tracing::{debug, info};

use super::error::SettingsError;
use super::store::{NamingSeriesConfigurator, SettingsStore};
use super::types::{BuyingSettings, DefaultKey, NamingRule};

/// Record type whose naming the buying settings control.
pub const SUPPLIER_DOCTYPE: &str = "Supplier";

/// Field holding the supplier display name.
pub const SUPPLIER_NAME_FIELD: &str = "supplier_name";

/// Service for validating and loading buying settings.
pub struct BuyingSettingsService;

impl BuyingSettingsService {
    /// Validates the settings record.
    ///
    /// Every buying default is written to `store` (empty when unset), then
    /// supplier naming is switched to naming series iff the naming rule says so.
    pub async fn validate<S, N>(
        settings: &BuyingSettings,
        store: &S,
        naming: &N,
    ) -> Result<(), SettingsError>
    where
        S: SettingsStore + ?Sized,
        N: NamingSeriesConfigurator + ?Sized,
    {
        for key in DefaultKey::ALL {
            let value = settings.default_value(key);
            debug!(key = key.as_str(), value = %value, "Setting default");
            store.set_default(key.as_str(), &value).await?;
        }

        let rule = Self::supplier_naming_rule(settings);
        naming.set_by_naming_series(&rule).await?;

        info!(
            by_naming_series = rule.by_naming_series,
            "Buying settings validated"
        );
        Ok(())
    }

    /// Reads the buying defaults back into a settings record.
    pub async fn load<S>(store: &S) -> Result<BuyingSettings, SettingsError>
    where
        S: SettingsStore + ?Sized,
    {
        let mut settings = BuyingSettings::default();
        for key in DefaultKey::ALL {
            if let Some(value) = store.get_default(key.as_str()).await? {
                settings.apply_default(key, &value);
            }
        }
        Ok(settings)
    }

    /// The supplier naming rule implied by the settings.
    #[must_use]
    pub fn supplier_naming_rule(settings: &BuyingSettings) -> NamingRule {
        NamingRule {
            doctype: SUPPLIER_DOCTYPE.to_string(),
            name_field: SUPPLIER_NAME_FIELD.to_string(),
            by_naming_series: settings.names_by_series(),
            hide_name_field: false,
        }
    }
}
