//! Supplier tax identifier capability.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which column the supplier master uses for its tax identifier.
///
/// Installations localised for India carry a dedicated `pan` column; all others
/// fall back to the generic `tax_id`. The flag is resolved once at startup and
/// passed to everything that renders supplier tax identifiers.
///
/// Configuration values are parsed leniently through [`FromStr`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum TaxIdField {
    /// Permanent Account Number.
    Pan,
    /// Generic tax identifier.
    #[default]
    TaxId,
}

impl TaxIdField {
    /// Returns the field name used in report rows and in the supplier table.
    #[must_use]
    pub const fn fieldname(self) -> &'static str {
        match self {
            Self::Pan => "pan",
            Self::TaxId => "tax_id",
        }
    }

    /// Returns the human readable column label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pan => "PAN",
            Self::TaxId => "Tax Id",
        }
    }
}

impl fmt::Display for TaxIdField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fieldname())
    }
}

impl FromStr for TaxIdField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pan" => Ok(Self::Pan),
            "tax_id" | "taxid" => Ok(Self::TaxId),
            other => Err(format!("unknown tax id field: {other}")),
        }
    }
}

impl TryFrom<String> for TaxIdField {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
