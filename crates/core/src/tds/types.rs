//! TDS report data types.

use std::collections::{HashMap, HashSet};
use std::fmt;

use chrono::NaiveDate;
use khata_shared::TaxIdField;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::error::TdsError;

/// Filter value that switches on the supplier display name column.
pub const NAMING_SERIES: &str = "Naming Series";

/// Report filters as submitted by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TdsFilters {
    /// First posting date included in the report.
    pub from_date: NaiveDate,
    /// Last posting date included in the report.
    pub to_date: NaiveDate,
    /// Company whose withholding accounts are reported.
    #[serde(default)]
    pub company: Option<String>,
    /// Restricts the report to one supplier.
    #[serde(default)]
    pub supplier: Option<String>,
    /// Supplier naming rule in effect ("Naming Series" adds the name column).
    #[serde(default)]
    pub naming_series: Option<String>,
}

impl TdsFilters {
    /// Checks that the date range is not inverted.
    pub fn validate(&self) -> Result<(), TdsError> {
        if self.from_date > self.to_date {
            return Err(TdsError::InvalidDateRange {
                from_date: self.from_date,
                to_date: self.to_date,
            });
        }
        Ok(())
    }

    /// Whether rows and columns carry the supplier display name.
    #[must_use]
    pub fn shows_supplier_name(&self) -> bool {
        self.naming_series.as_deref() == Some(NAMING_SERIES)
    }

    /// The supplier filter, ignoring blank values.
    #[must_use]
    pub fn supplier(&self) -> Option<&str> {
        self.supplier.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// The company filter, ignoring blank values.
    #[must_use]
    pub fn company(&self) -> Option<&str> {
        self.company.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Type of the document that posted a ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VoucherType {
    /// Purchase Invoice.
    PurchaseInvoice,
    /// Payment Entry.
    PaymentEntry,
    /// Journal Entry.
    JournalEntry,
    /// Any other document type.
    Other(String),
}

impl VoucherType {
    /// Returns the document type name as stored in the ledger.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::PurchaseInvoice => "Purchase Invoice",
            Self::PaymentEntry => "Payment Entry",
            Self::JournalEntry => "Journal Entry",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for VoucherType {
    fn from(value: &str) -> Self {
        match value {
            "Purchase Invoice" => Self::PurchaseInvoice,
            "Payment Entry" => Self::PaymentEntry,
            "Journal Entry" => Self::JournalEntry,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for VoucherType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<VoucherType> for String {
    fn from(value: VoucherType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for VoucherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A posted general ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlEntry {
    /// Document number of the voucher that posted the entry.
    pub voucher_no: String,
    /// Document type of the voucher.
    pub voucher_type: VoucherType,
    /// Ledger account.
    pub account: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Posting date.
    pub posting_date: NaiveDate,
    /// Counterparty of the movement (account or party name).
    pub against: Option<String>,
    /// Party the entry was booked for.
    pub party: Option<String>,
    /// Cancelled entries never take part in the report.
    #[serde(default)]
    pub is_cancelled: bool,
}

impl GlEntry {
    /// The party, falling back to the counterparty when no party is set.
    #[must_use]
    pub fn counterparty(&self) -> Option<&str> {
        non_blank(self.party.as_deref()).or_else(|| non_blank(self.against.as_deref()))
    }
}

/// Voucher metadata joined onto the matched ledger entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoucherMeta {
    /// Withholding category chosen on the voucher itself.
    pub tax_withholding_category: Option<String>,
    /// Net total subject to withholding (purchase invoices only).
    pub net_total: Option<Decimal>,
    /// Supplier parties on the journal entry lines, in line order.
    pub journal_parties: Vec<String>,
}

/// Supplier master data used by the report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplierInfo {
    /// Supplier identifier.
    pub name: String,
    /// PAN or generic tax id, depending on the installation.
    pub tax_id: Option<String>,
    /// Display name.
    pub supplier_name: Option<String>,
    /// Company, Individual, etc.
    pub supplier_type: Option<String>,
    /// Default withholding category.
    pub tax_withholding_category: Option<String>,
}

/// Everything the aggregation needs, loaded in one pass by the data layer.
#[derive(Debug, Clone, Default)]
pub struct TdsDataset {
    /// Ledger accounts that hold TDS liability.
    pub tds_accounts: HashSet<String>,
    /// All non-cancelled entries of the matched vouchers, in posting order.
    pub entries: Vec<GlEntry>,
    /// Metadata per matched voucher number.
    pub vouchers: HashMap<String, VoucherMeta>,
    /// Supplier master records by supplier identifier.
    pub suppliers: HashMap<String, SupplierInfo>,
    /// Statutory rate (percent) per withholding category.
    pub rates: HashMap<String, Decimal>,
}

/// One report line: the withholding on a single voucher.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TdsRow {
    /// Supplier PAN or tax id.
    pub tax_id: Option<String>,
    /// Supplier identifier, when the party is a known supplier.
    pub supplier: Option<String>,
    /// Supplier display name.
    pub supplier_name: Option<String>,
    /// Withholding category (section code).
    pub section_code: Option<String>,
    /// Supplier type.
    pub entity_type: Option<String>,
    /// Applied rate in percent.
    pub tds_rate: Option<Decimal>,
    /// Amount the withholding was computed on.
    pub total_amount_credited: Decimal,
    /// Withheld amount.
    pub tds_deducted: Decimal,
    /// Posting date of the voucher.
    pub transaction_date: NaiveDate,
    /// Voucher document type.
    pub transaction_type: VoucherType,
    /// Voucher number.
    pub ref_no: String,
}

impl TdsRow {
    /// Renders the row as a record keyed by column field names.
    ///
    /// Rates and amounts are written as normalized decimal strings (`"1000"`,
    /// `"12.5"`) so no precision is lost on the wire.
    #[must_use]
    pub fn to_record(&self, tax_id_field: TaxIdField, include_supplier_name: bool) -> Map<String, Value> {
        let mut record = Map::new();
        record.insert(tax_id_field.fieldname().to_string(), json!(self.tax_id));
        record.insert("supplier".to_string(), json!(self.supplier));
        if include_supplier_name {
            record.insert("supplier_name".to_string(), json!(self.supplier_name));
        }
        record.insert("section_code".to_string(), json!(self.section_code));
        record.insert("entity_type".to_string(), json!(self.entity_type));
        record.insert(
            "tds_rate".to_string(),
            json!(self.tds_rate.map(decimal_string)),
        );
        record.insert(
            "total_amount_credited".to_string(),
            json!(decimal_string(self.total_amount_credited)),
        );
        record.insert(
            "tds_deducted".to_string(),
            json!(decimal_string(self.tds_deducted)),
        );
        record.insert("transaction_date".to_string(), json!(self.transaction_date));
        record.insert("transaction_type".to_string(), json!(self.transaction_type));
        record.insert("ref_no".to_string(), json!(self.ref_no));
        record
    }
}

/// Field type of a report column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// Free text.
    Data,
    /// Link to a record of the type named in `options`.
    Link,
    /// Link whose target type is read from the column named in `options`.
    #[serde(rename = "Dynamic Link")]
    DynamicLink,
    /// Percentage.
    Percent,
    /// Decimal number.
    Float,
    /// Calendar date.
    Date,
}

/// Column metadata for the tabular renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportColumn {
    /// Column heading.
    pub label: String,
    /// Key of the value in each row.
    pub fieldname: String,
    /// Field type, when the renderer needs one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fieldtype: Option<FieldType>,
    /// Link target or dynamic link source column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    /// Display width in pixels.
    pub width: u32,
}

/// Finished report.
#[derive(Debug, Clone, Serialize)]
pub struct TdsReport {
    /// Ordered column metadata.
    pub columns: Vec<ReportColumn>,
    /// One record per voucher with a withholding deduction.
    pub rows: Vec<Map<String, Value>>,
}

fn decimal_string(value: Decimal) -> String {
    value.normalize().to_string()
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
