//! Column schema of the TDS report.

use khata_shared::TaxIdField;

use super::types::{FieldType, ReportColumn, TdsFilters};

fn column(
    label: &str,
    fieldname: &str,
    fieldtype: Option<FieldType>,
    options: Option<&str>,
    width: u32,
) -> ReportColumn {
    ReportColumn {
        label: label.to_string(),
        fieldname: fieldname.to_string(),
        fieldtype,
        options: options.map(str::to_string),
        width,
    }
}

/// Returns the ordered report columns.
///
/// The first column is labelled after the supplier tax identifier in use, and the
/// supplier display name is only shown when suppliers are named by series.
#[must_use]
pub fn build_columns(filters: &TdsFilters, tax_id_field: TaxIdField) -> Vec<ReportColumn> {
    let mut columns = vec![
        column(
            tax_id_field.label(),
            tax_id_field.fieldname(),
            Some(FieldType::Data),
            None,
            90,
        ),
        column(
            "Supplier",
            "supplier",
            Some(FieldType::Link),
            Some("Supplier"),
            180,
        ),
    ];

    if filters.shows_supplier_name() {
        columns.push(column(
            "Supplier Name",
            "supplier_name",
            Some(FieldType::Data),
            None,
            180,
        ));
    }

    columns.extend([
        column(
            "Section Code",
            "section_code",
            Some(FieldType::Link),
            Some("Tax Withholding Category"),
            180,
        ),
        column("Entity Type", "entity_type", Some(FieldType::Data), None, 180),
        column("TDS Rate %", "tds_rate", Some(FieldType::Percent), None, 90),
        column(
            "Total Amount Credited",
            "total_amount_credited",
            Some(FieldType::Float),
            None,
            90,
        ),
        column(
            "Amount of TDS Deducted",
            "tds_deducted",
            Some(FieldType::Float),
            None,
            90,
        ),
        column(
            "Date of Transaction",
            "transaction_date",
            Some(FieldType::Date),
            None,
            90,
        ),
        column("Transaction Type", "transaction_type", None, None, 90),
        column(
            "Reference No.",
            "ref_no",
            Some(FieldType::DynamicLink),
            Some("transaction_type"),
            90,
        ),
    ]);

    columns
}
