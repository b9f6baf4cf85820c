//! Tests for the TDS report module.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use khata_shared::TaxIdField;
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

use super::*;

const TDS_ACCOUNT: &str = "TDS Payable - AC";
const CREDITORS: &str = "Creditors - AC";
const EXPENSE: &str = "Professional Fees - AC";
const BANK: &str = "HDFC Bank - AC";

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, day).unwrap()
}

fn filters(naming_series: Option<&str>) -> TdsFilters {
    TdsFilters {
        from_date: date(1),
        to_date: date(30),
        company: Some("Acme Consulting".to_string()),
        supplier: None,
        naming_series: naming_series.map(str::to_string),
    }
}

fn entry(
    voucher_no: &str,
    voucher_type: VoucherType,
    account: &str,
    debit: Decimal,
    credit: Decimal,
    party: Option<&str>,
    against: Option<&str>,
) -> GlEntry {
    GlEntry {
        voucher_no: voucher_no.to_string(),
        voucher_type,
        account: account.to_string(),
        debit,
        credit,
        posting_date: date(10),
        against: against.map(str::to_string),
        party: party.map(str::to_string),
        is_cancelled: false,
    }
}

fn supplier(name: &str, category: Option<&str>) -> SupplierInfo {
    SupplierInfo {
        name: name.to_string(),
        tax_id: Some(format!("PAN-{name}")),
        supplier_name: Some(format!("{name} Pvt Ltd")),
        supplier_type: Some("Company".to_string()),
        tax_withholding_category: category.map(str::to_string),
    }
}

/// A purchase invoice for Globex: expense 10000 debit, creditor credit for the
/// net payable and the withheld amount credited to the TDS account.
fn invoice_dataset(deducted: Decimal, net_total: Option<Decimal>) -> TdsDataset {
    let pi = VoucherType::PurchaseInvoice;
    TdsDataset {
        tds_accounts: HashSet::from([TDS_ACCOUNT.to_string()]),
        entries: vec![
            entry("PI-0001", pi.clone(), EXPENSE, dec!(10000), dec!(0), None, Some("Globex")),
            entry(
                "PI-0001",
                pi.clone(),
                CREDITORS,
                dec!(0),
                dec!(10000) - deducted,
                Some("Globex"),
                Some(EXPENSE),
            ),
            entry("PI-0001", pi, TDS_ACCOUNT, dec!(0), deducted, None, Some("Globex")),
        ],
        vouchers: HashMap::from([(
            "PI-0001".to_string(),
            VoucherMeta {
                tax_withholding_category: Some("194J".to_string()),
                net_total,
                journal_parties: Vec::new(),
            },
        )]),
        suppliers: HashMap::from([("Globex".to_string(), supplier("Globex", Some("194C")))]),
        rates: HashMap::from([
            ("194J".to_string(), dec!(10)),
            ("194C".to_string(), dec!(2)),
        ]),
    }
}

// ============================================================================
// Filters
// ============================================================================

#[test]
fn test_inverted_date_range_is_rejected() {
    let mut f = filters(None);
    f.from_date = date(30);
    f.to_date = date(1);

    let result = TdsReportService::build_report(&f, &invoice_dataset(dec!(1000), None), TaxIdField::Pan);
    assert!(matches!(result, Err(TdsError::InvalidDateRange { .. })));
}

#[test]
fn test_same_day_range_is_valid() {
    let mut f = filters(None);
    f.to_date = f.from_date;
    assert!(f.validate().is_ok());
}

#[test]
fn test_blank_supplier_filter_is_ignored() {
    let mut f = filters(None);
    f.supplier = Some("  ".to_string());
    assert!(f.supplier().is_none());
}

// ============================================================================
// Columns
// ============================================================================

#[rstest]
#[case(Some("Naming Series"), true)]
#[case(Some("Supplier Name"), false)]
#[case(Some("naming series"), false)]
#[case(None, false)]
fn test_supplier_name_column_follows_naming_series(
    #[case] naming_series: Option<&str>,
    #[case] expected: bool,
) {
    let columns = build_columns(&filters(naming_series), TaxIdField::Pan);
    let has_name = columns.iter().any(|c| c.fieldname == "supplier_name");
    assert_eq!(has_name, expected);
    assert_eq!(columns.len(), if expected { 11 } else { 10 });
}

#[rstest]
#[case(TaxIdField::Pan, "pan", "PAN")]
#[case(TaxIdField::TaxId, "tax_id", "Tax Id")]
fn test_first_column_follows_tax_id_capability(
    #[case] field: TaxIdField,
    #[case] fieldname: &str,
    #[case] label: &str,
) {
    let columns = build_columns(&filters(None), field);
    assert_eq!(columns[0].fieldname, fieldname);
    assert_eq!(columns[0].label, label);
    assert_eq!(columns[0].width, 90);
}

#[test]
fn test_column_order_and_metadata() {
    let columns = build_columns(&filters(Some(NAMING_SERIES)), TaxIdField::Pan);
    let names: Vec<&str> = columns.iter().map(|c| c.fieldname.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "pan",
            "supplier",
            "supplier_name",
            "section_code",
            "entity_type",
            "tds_rate",
            "total_amount_credited",
            "tds_deducted",
            "transaction_date",
            "transaction_type",
            "ref_no",
        ]
    );

    let reference = columns.last().unwrap();
    assert_eq!(reference.fieldtype, Some(FieldType::DynamicLink));
    assert_eq!(reference.options.as_deref(), Some("transaction_type"));

    let transaction_type = &columns[9];
    assert_eq!(transaction_type.fieldtype, None);

    let serialized = serde_json::to_value(reference).unwrap();
    assert_eq!(serialized["fieldtype"], json!("Dynamic Link"));
    let serialized = serde_json::to_value(transaction_type).unwrap();
    assert!(serialized.get("fieldtype").is_none());
}

// ============================================================================
// Aggregation
// ============================================================================

#[test]
fn test_full_deduction_keeps_statutory_rate() {
    let rows = TdsReportService::build_rows(&invoice_dataset(dec!(1000), Some(dec!(10000))));

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.tds_deducted, dec!(1000));
    assert_eq!(row.total_amount_credited, dec!(10000));
    assert_eq!(row.tds_rate, Some(dec!(10)));
    assert_eq!(row.section_code.as_deref(), Some("194J"));
    assert_eq!(row.ref_no, "PI-0001");
    assert_eq!(row.transaction_type, VoucherType::PurchaseInvoice);
}

#[test]
fn test_partial_exemption_uses_realized_rate() {
    let rows = TdsReportService::build_rows(&invoice_dataset(dec!(500), Some(dec!(10000))));

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].tds_deducted, dec!(500));
    assert_eq!(rows[0].tds_rate, Some(dec!(5)));
}

#[test]
fn test_net_total_overrides_credit_sum() {
    // Credits on the voucher sum to 10000, the invoice says 8000 is subject to TDS
    let rows = TdsReportService::build_rows(&invoice_dataset(dec!(800), Some(dec!(8000))));

    assert_eq!(rows[0].total_amount_credited, dec!(8000));
    assert_eq!(rows[0].tds_rate, Some(dec!(10)));
}

#[test]
fn test_missing_net_total_falls_back_to_credit_sum() {
    let rows = TdsReportService::build_rows(&invoice_dataset(dec!(1000), None));
    assert_eq!(rows[0].total_amount_credited, dec!(10000));

    let rows = TdsReportService::build_rows(&invoice_dataset(dec!(1000), Some(Decimal::ZERO)));
    assert_eq!(rows[0].total_amount_credited, dec!(10000));
}

#[test]
fn test_voucher_without_tds_activity_emits_no_row() {
    let mut dataset = invoice_dataset(dec!(1000), Some(dec!(10000)));
    dataset.entries.push(entry(
        "PE-0001",
        VoucherType::PaymentEntry,
        CREDITORS,
        dec!(9000),
        dec!(0),
        Some("Globex"),
        Some(BANK),
    ));
    dataset.entries.push(entry(
        "PE-0001",
        VoucherType::PaymentEntry,
        BANK,
        dec!(0),
        dec!(9000),
        None,
        Some("Globex"),
    ));

    let rows = TdsReportService::build_rows(&dataset);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ref_no, "PI-0001");
}

#[test]
fn test_reversed_deduction_nets_to_zero() {
    let mut dataset = invoice_dataset(dec!(1000), Some(dec!(10000)));
    dataset.entries.push(entry(
        "PI-0001",
        VoucherType::PurchaseInvoice,
        TDS_ACCOUNT,
        dec!(1000),
        dec!(0),
        None,
        Some("Globex"),
    ));

    assert!(TdsReportService::build_rows(&dataset).is_empty());
}

#[test]
fn test_cancelled_entries_are_ignored() {
    let mut dataset = invoice_dataset(dec!(1000), Some(dec!(10000)));
    for entry in &mut dataset.entries {
        entry.is_cancelled = true;
    }
    assert!(TdsReportService::build_rows(&dataset).is_empty());
}

#[test]
fn test_category_falls_back_to_supplier_default() {
    let mut dataset = invoice_dataset(dec!(200), None);
    dataset.vouchers.get_mut("PI-0001").unwrap().tax_withholding_category = None;

    let rows = TdsReportService::build_rows(&dataset);
    assert_eq!(rows[0].section_code.as_deref(), Some("194C"));
    // 200 of 10000 is exactly the 2% statutory rate
    assert_eq!(rows[0].tds_rate, Some(dec!(2)));
}

#[test]
fn test_unknown_category_has_no_rate() {
    let mut dataset = invoice_dataset(dec!(1000), Some(dec!(10000)));
    dataset.rates.clear();

    let rows = TdsReportService::build_rows(&dataset);
    assert_eq!(rows[0].tds_rate, None);
}

#[test]
fn test_supplier_details_come_from_master() {
    let rows = TdsReportService::build_rows(&invoice_dataset(dec!(1000), None));
    let row = &rows[0];
    assert_eq!(row.supplier.as_deref(), Some("Globex"));
    assert_eq!(row.tax_id.as_deref(), Some("PAN-Globex"));
    assert_eq!(row.supplier_name.as_deref(), Some("Globex Pvt Ltd"));
    assert_eq!(row.entity_type.as_deref(), Some("Company"));
}

#[test]
fn test_journal_entry_uses_first_line_party() {
    let je = VoucherType::JournalEntry;
    let dataset = TdsDataset {
        tds_accounts: HashSet::from([TDS_ACCOUNT.to_string()]),
        entries: vec![
            entry("JV-0001", je.clone(), CREDITORS, dec!(300), dec!(0), None, Some(TDS_ACCOUNT)),
            entry("JV-0001", je, TDS_ACCOUNT, dec!(0), dec!(300), None, Some(CREDITORS)),
        ],
        vouchers: HashMap::from([(
            "JV-0001".to_string(),
            VoucherMeta {
                tax_withholding_category: None,
                net_total: None,
                journal_parties: vec!["Initech".to_string(), "Globex".to_string()],
            },
        )]),
        suppliers: HashMap::from([
            ("Initech".to_string(), supplier("Initech", Some("194I"))),
            ("Globex".to_string(), supplier("Globex", Some("194C"))),
        ]),
        rates: HashMap::from([("194I".to_string(), dec!(10))]),
    };

    let rows = TdsReportService::build_rows(&dataset);
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.supplier.as_deref(), Some("Initech"));
    assert_eq!(row.section_code.as_deref(), Some("194I"));
    assert_eq!(row.total_amount_credited, dec!(300));
    // 300 of 300 credited is 100%, above the statutory 10%
    assert_eq!(row.tds_rate, Some(dec!(10)));
}

#[test]
fn test_overflowing_voucher_is_skipped() {
    let mut dataset = invoice_dataset(dec!(1000), Some(dec!(10000)));
    let jv = VoucherType::JournalEntry;
    dataset.entries.extend([
        entry("JV-0009", jv.clone(), TDS_ACCOUNT, dec!(0), Decimal::MAX, None, Some("Globex")),
        entry("JV-0009", jv, TDS_ACCOUNT, dec!(0), Decimal::MAX, None, Some("Globex")),
    ]);

    let rows = TdsReportService::build_rows(&dataset);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ref_no, "PI-0001");
}

#[test]
fn test_zero_credited_keeps_statutory_rate() {
    let dataset = TdsDataset {
        tds_accounts: HashSet::from([TDS_ACCOUNT.to_string()]),
        entries: vec![entry(
            "PE-0002",
            VoucherType::PaymentEntry,
            TDS_ACCOUNT,
            dec!(50),
            dec!(0),
            Some("Globex"),
            None,
        )],
        vouchers: HashMap::new(),
        suppliers: HashMap::from([("Globex".to_string(), supplier("Globex", Some("194C")))]),
        rates: HashMap::from([("194C".to_string(), dec!(2))]),
    };

    let rows = TdsReportService::build_rows(&dataset);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].tds_deducted, dec!(-50));
    assert_eq!(rows[0].total_amount_credited, Decimal::ZERO);
    assert_eq!(rows[0].tds_rate, Some(dec!(2)));
}

#[test]
fn test_rows_follow_first_appearance_order() {
    let mut dataset = invoice_dataset(dec!(1000), None);
    let mut second = invoice_dataset(dec!(100), None).entries;
    for e in &mut second {
        e.voucher_no = "PI-0000".to_string();
    }
    let first = std::mem::take(&mut dataset.entries);
    dataset.entries = first.into_iter().chain(second).collect();

    let rows = TdsReportService::build_rows(&dataset);
    let refs: Vec<&str> = rows.iter().map(|r| r.ref_no.as_str()).collect();
    assert_eq!(refs, vec!["PI-0001", "PI-0000"]);
}

// ============================================================================
// Report records
// ============================================================================

#[test]
fn test_report_records_match_columns() {
    let dataset = invoice_dataset(dec!(1000), Some(dec!(10000)));
    let report =
        TdsReportService::build_report(&filters(Some(NAMING_SERIES)), &dataset, TaxIdField::Pan)
            .unwrap();

    assert_eq!(report.rows.len(), 1);
    let record = &report.rows[0];
    for column in &report.columns {
        assert!(record.contains_key(&column.fieldname), "missing {}", column.fieldname);
    }
    assert_eq!(record["pan"], json!("PAN-Globex"));
    assert_eq!(record["supplier_name"], json!("Globex Pvt Ltd"));
    assert_eq!(record["transaction_type"], json!("Purchase Invoice"));
    assert_eq!(record["transaction_date"], json!("2024-04-10"));
}

#[test]
fn test_report_amounts_are_normalized_decimal_strings() {
    let mut dataset = invoice_dataset(dec!(500.000000), Some(dec!(10000.000000)));
    dataset.rates.insert("194J".to_string(), dec!(10.0000));
    let report =
        TdsReportService::build_report(&filters(None), &dataset, TaxIdField::Pan).unwrap();

    let record = &report.rows[0];
    assert_eq!(record["tds_deducted"], json!("500"));
    assert_eq!(record["total_amount_credited"], json!("10000"));
    assert_eq!(record["tds_rate"], json!("5"));
}

#[test]
fn test_report_records_without_naming_series() {
    let dataset = invoice_dataset(dec!(1000), Some(dec!(10000)));
    let report =
        TdsReportService::build_report(&filters(None), &dataset, TaxIdField::TaxId).unwrap();

    let record = &report.rows[0];
    assert!(record.contains_key("tax_id"));
    assert!(!record.contains_key("pan"));
    assert!(!record.contains_key("supplier_name"));
}

// ============================================================================
// Entry selection
// ============================================================================

#[test]
fn test_query_selects_tds_entries_not_against_bank() {
    let query = TdsEntryQuery::new(
        &filters(None),
        vec![TDS_ACCOUNT.to_string()],
        vec![BANK.to_string()],
    );
    let pi = VoucherType::PurchaseInvoice;

    assert!(query.matches(&entry("PI-1", pi.clone(), TDS_ACCOUNT, dec!(0), dec!(10), None, Some("Globex"))));
    assert!(query.matches(&entry("PI-1", pi.clone(), TDS_ACCOUNT, dec!(0), dec!(10), None, None)));
    assert!(!query.matches(&entry("PI-1", pi.clone(), TDS_ACCOUNT, dec!(10), dec!(0), None, Some(BANK))));
    assert!(!query.matches(&entry("PI-1", pi.clone(), CREDITORS, dec!(0), dec!(10), Some("Globex"), None)));

    let mut outside = entry("PI-1", pi.clone(), TDS_ACCOUNT, dec!(0), dec!(10), None, Some("Globex"));
    outside.posting_date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    assert!(!query.matches(&outside));

    let mut cancelled = entry("PI-1", pi, TDS_ACCOUNT, dec!(0), dec!(10), None, Some("Globex"));
    cancelled.is_cancelled = true;
    assert!(!query.matches(&cancelled));
}

#[test]
fn test_supplier_filter_drops_account_restriction() {
    let mut f = filters(None);
    f.supplier = Some("Globex".to_string());
    let query = TdsEntryQuery::new(&f, vec![TDS_ACCOUNT.to_string()], vec![BANK.to_string()]);

    assert_eq!(query.scope, EntryScope::Supplier("Globex".to_string()));
    assert!(!query.is_empty());
    let pe = VoucherType::PaymentEntry;
    assert!(query.matches(&entry("PE-1", pe.clone(), BANK, dec!(0), dec!(10), None, Some("Globex"))));
    assert!(query.matches(&entry("PE-1", pe.clone(), CREDITORS, dec!(10), dec!(0), Some("Globex"), Some(BANK))));
    assert!(!query.matches(&entry("PE-1", pe, TDS_ACCOUNT, dec!(0), dec!(10), Some("Initech"), None)));
}

#[test]
fn test_query_without_tds_accounts_is_empty() {
    let query = TdsEntryQuery::new(&filters(None), Vec::new(), Vec::new());
    assert!(query.is_empty());
}

// ============================================================================
// Voucher types
// ============================================================================

#[rstest]
#[case("Purchase Invoice", VoucherType::PurchaseInvoice)]
#[case("Payment Entry", VoucherType::PaymentEntry)]
#[case("Journal Entry", VoucherType::JournalEntry)]
#[case("Purchase Receipt", VoucherType::Other("Purchase Receipt".to_string()))]
fn test_voucher_type_names(#[case] name: &str, #[case] expected: VoucherType) {
    let parsed = VoucherType::from(name);
    assert_eq!(parsed, expected);
    assert_eq!(parsed.as_str(), name);
}

// ============================================================================
// Rate properties
// ============================================================================

proptest! {
    /// The applied rate is never above the statutory rate when one exists.
    #[test]
    fn test_effective_rate_never_exceeds_statutory(
        deducted in 1i64..1_000_000,
        credited in 1i64..10_000_000,
        statutory in 0i64..40,
    ) {
        let statutory = Decimal::from(statutory);
        let rate = TdsReportService::effective_rate(
            Some(statutory),
            Decimal::from(deducted),
            Decimal::from(credited),
        )
        .unwrap();
        prop_assert!(rate <= statutory);
    }

    /// The realized rate wins exactly when it is below the statutory rate.
    #[test]
    fn test_effective_rate_picks_lesser(
        deducted in 1i64..1_000_000,
        credited in 1i64..10_000_000,
        statutory in 0i64..40,
    ) {
        let statutory = Decimal::from(statutory);
        let deducted = Decimal::from(deducted);
        let credited = Decimal::from(credited);
        let realized = TdsReportService::realized_rate(deducted, credited).unwrap();
        let rate = TdsReportService::effective_rate(Some(statutory), deducted, credited).unwrap();
        if realized < statutory {
            prop_assert_eq!(rate, realized);
        } else {
            prop_assert_eq!(rate, statutory);
        }
    }
}
