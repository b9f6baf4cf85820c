//! Buying settings.
//!
//! Validating the buying settings writes its defaults to a [`SettingsStore`] and
//! switches supplier naming through a [`NamingSeriesConfigurator`].

pub mod error;
pub mod memory;
pub mod service;
pub mod store;
pub mod types;

pub use error::SettingsError;
pub use memory::InMemorySettings;
pub use service::BuyingSettingsService;
pub use store::{NamingSeriesConfigurator, SettingsStore};
pub use types::{BuyingSettings, DefaultKey, NamingRule, SupplierNaming};
