//! Settings data types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How new suppliers are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupplierNaming {
    /// The supplier name is the identifier.
    #[serde(rename = "Supplier Name")]
    SupplierName,
    /// Identifiers come from a naming series.
    #[serde(rename = "Naming Series")]
    NamingSeries,
    /// Identifiers are generated automatically.
    #[serde(rename = "Auto Name")]
    AutoName,
}

impl SupplierNaming {
    /// Returns the stored value of the naming rule.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SupplierName => "Supplier Name",
            Self::NamingSeries => "Naming Series",
            Self::AutoName => "Auto Name",
        }
    }
}

impl fmt::Display for SupplierNaming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupplierNaming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Supplier Name" => Ok(Self::SupplierName),
            "Naming Series" => Ok(Self::NamingSeries),
            "Auto Name" => Ok(Self::AutoName),
            other => Err(format!("unknown supplier naming rule: {other}")),
        }
    }
}

/// Process-wide default keys owned by the buying settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultKey {
    /// Default supplier group for new suppliers.
    SupplierGroup,
    /// Supplier naming rule.
    SuppMasterName,
    /// Keep the same rate throughout the purchase cycle.
    MaintainSameRate,
    /// Default buying price list.
    BuyingPriceList,
}

impl DefaultKey {
    /// All keys, in the order they are written.
    pub const ALL: [Self; 4] = [
        Self::SupplierGroup,
        Self::SuppMasterName,
        Self::MaintainSameRate,
        Self::BuyingPriceList,
    ];

    /// Returns the key name in the defaults store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SupplierGroup => "supplier_group",
            Self::SuppMasterName => "supp_master_name",
            Self::MaintainSameRate => "maintain_same_rate",
            Self::BuyingPriceList => "buying_price_list",
        }
    }
}

/// The buying settings record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyingSettings {
    /// Default supplier group.
    #[serde(default)]
    pub supplier_group: Option<String>,
    /// Supplier naming rule.
    #[serde(default)]
    pub supp_master_name: Option<SupplierNaming>,
    /// Maintain the same rate throughout the purchase cycle.
    #[serde(default)]
    pub maintain_same_rate: Option<bool>,
    /// Default buying price list.
    #[serde(default)]
    pub buying_price_list: Option<String>,
}

impl BuyingSettings {
    /// Returns the value written for a default key; absent values become "".
    #[must_use]
    pub fn default_value(&self, key: DefaultKey) -> String {
        match key {
            DefaultKey::SupplierGroup => self.supplier_group.clone().unwrap_or_default(),
            DefaultKey::SuppMasterName => self
                .supp_master_name
                .map(|n| n.as_str().to_string())
                .unwrap_or_default(),
            DefaultKey::MaintainSameRate => match self.maintain_same_rate {
                Some(true) => "1".to_string(),
                Some(false) => "0".to_string(),
                None => String::new(),
            },
            DefaultKey::BuyingPriceList => self.buying_price_list.clone().unwrap_or_default(),
        }
    }

    /// Whether suppliers are named by naming series.
    #[must_use]
    pub fn names_by_series(&self) -> bool {
        self.supp_master_name == Some(SupplierNaming::NamingSeries)
    }

    /// Applies a stored default value to the matching field.
    ///
    /// Empty and unrecognised values clear the field.
    pub fn apply_default(&mut self, key: DefaultKey, value: &str) {
        let value = value.trim();
        let text = (!value.is_empty()).then(|| value.to_string());
        match key {
            DefaultKey::SupplierGroup => self.supplier_group = text,
            DefaultKey::SuppMasterName => self.supp_master_name = value.parse().ok(),
            DefaultKey::MaintainSameRate => {
                self.maintain_same_rate = match value {
                    "1" => Some(true),
                    "0" => Some(false),
                    _ => None,
                };
            }
            DefaultKey::BuyingPriceList => self.buying_price_list = text,
        }
    }
}

/// Naming configuration of one record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingRule {
    /// Record type, e.g. "Supplier".
    pub doctype: String,
    /// Field holding the human readable name.
    pub name_field: String,
    /// Whether identifiers come from a naming series.
    pub by_naming_series: bool,
    /// Hide the name field when naming by series.
    pub hide_name_field: bool,
}

impl NamingRule {
    /// Returns the autoname expression for the record type.
    #[must_use]
    pub fn autoname(&self) -> String {
        if self.by_naming_series {
            "naming_series:".to_string()
        } else {
            format!("field:{}", self.name_field)
        }
    }

    /// Whether the naming series field must be filled in.
    #[must_use]
    pub const fn naming_series_required(&self) -> bool {
        self.by_naming_series
    }

    /// Whether the naming series field is hidden.
    #[must_use]
    pub const fn naming_series_hidden(&self) -> bool {
        !self.by_naming_series
    }

    /// Whether the name field must be filled in.
    #[must_use]
    pub const fn name_field_required(&self) -> bool {
        !self.by_naming_series
    }

    /// Whether the name field is hidden.
    #[must_use]
    pub const fn name_field_hidden(&self) -> bool {
        self.by_naming_series && self.hide_name_field
    }
}
