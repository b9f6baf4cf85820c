//! TDS report aggregation service.

use std::collections::HashMap;

use khata_shared::TaxIdField;
use rust_decimal::Decimal;
use tracing::warn;

use super::columns::build_columns;
use super::error::TdsError;
use super::types::{GlEntry, TdsDataset, TdsFilters, TdsReport, TdsRow, VoucherType, non_blank};

/// Service for generating the TDS payable report.
pub struct TdsReportService;

impl TdsReportService {
    /// Builds columns and rows for the given filters over a loaded dataset.
    ///
    /// # Errors
    ///
    /// Returns [`TdsError::InvalidDateRange`] if `from_date` is after `to_date`.
    pub fn build_report(
        filters: &TdsFilters,
        dataset: &TdsDataset,
        tax_id_field: TaxIdField,
    ) -> Result<TdsReport, TdsError> {
        filters.validate()?;

        let include_supplier_name = filters.shows_supplier_name();
        let rows = Self::build_rows(dataset)
            .iter()
            .map(|row| row.to_record(tax_id_field, include_supplier_name))
            .collect();

        Ok(TdsReport {
            columns: build_columns(filters, tax_id_field),
            rows,
        })
    }

    /// Aggregates the dataset into one row per voucher with a non-zero deduction.
    ///
    /// Rows follow the order in which vouchers first appear in the entries.
    /// Vouchers whose amounts overflow a `Decimal` are skipped.
    #[must_use]
    pub fn build_rows(dataset: &TdsDataset) -> Vec<TdsRow> {
        let mut order: Vec<&str> = Vec::new();
        let mut groups: HashMap<&str, Vec<&GlEntry>> = HashMap::new();

        for entry in dataset.entries.iter().filter(|e| !e.is_cancelled) {
            groups
                .entry(entry.voucher_no.as_str())
                .or_insert_with(|| {
                    order.push(entry.voucher_no.as_str());
                    Vec::new()
                })
                .push(entry);
        }

        order
            .into_iter()
            .filter_map(|voucher_no| {
                let entries = groups.get(voucher_no)?;
                Self::aggregate_voucher(voucher_no, entries, dataset)
            })
            .collect()
    }

    fn aggregate_voucher(
        voucher_no: &str,
        entries: &[&GlEntry],
        dataset: &TdsDataset,
    ) -> Option<TdsRow> {
        let meta = dataset.vouchers.get(voucher_no);
        let journal_party = meta
            .and_then(|m| m.journal_parties.first())
            .map(String::as_str);
        let net_total = meta.and_then(|m| m.net_total).filter(|t| !t.is_zero());
        let mut category = meta
            .and_then(|m| non_blank(m.tax_withholding_category.as_deref()))
            .map(str::to_string);

        let mut supplier = None;
        let mut tds_deducted = Decimal::ZERO;
        let mut credited = Decimal::ZERO;

        for entry in entries {
            let mut party = entry.counterparty();
            if entry.voucher_type == VoucherType::JournalEntry && journal_party.is_some() {
                party = journal_party;
            }
            supplier = party;

            if category.is_none() {
                category = party
                    .and_then(|p| dataset.suppliers.get(p))
                    .and_then(|s| non_blank(s.tax_withholding_category.as_deref()))
                    .map(str::to_string);
            }

            let sums = if dataset.tds_accounts.contains(&entry.account) {
                entry
                    .credit
                    .checked_sub(entry.debit)
                    .and_then(|net| tds_deducted.checked_add(net))
                    .zip(credited.checked_add(entry.credit))
            } else {
                Some(tds_deducted).zip(credited.checked_add(entry.credit))
            };
            let Some((deducted, total)) = sums else {
                warn!(voucher = %voucher_no, "Voucher amounts overflow; skipping row");
                return None;
            };
            tds_deducted = deducted;
            credited = total;
        }

        if tds_deducted.is_zero() {
            return None;
        }

        let last = entries.last()?;
        let total_amount_credited = net_total.unwrap_or(credited);
        let statutory = category
            .as_ref()
            .and_then(|c| dataset.rates.get(c))
            .copied();

        if total_amount_credited.is_zero() {
            warn!(
                voucher = %voucher_no,
                tds_deducted = %tds_deducted,
                "Voucher has a TDS deduction but no amount credited; keeping statutory rate"
            );
        }

        let master = supplier.and_then(|s| dataset.suppliers.get(s));

        Some(TdsRow {
            tax_id: master.and_then(|s| s.tax_id.clone()),
            supplier: master.map(|s| s.name.clone()),
            supplier_name: master.and_then(|s| s.supplier_name.clone()),
            section_code: category,
            entity_type: master.and_then(|s| s.supplier_type.clone()),
            tds_rate: Self::effective_rate(statutory, tds_deducted, total_amount_credited),
            total_amount_credited,
            tds_deducted,
            transaction_date: last.posting_date,
            transaction_type: last.voucher_type.clone(),
            ref_no: voucher_no.to_string(),
        })
    }

    /// Rate actually withheld, in percent. `None` when nothing was credited.
    #[must_use]
    pub fn realized_rate(tds_deducted: Decimal, total_amount_credited: Decimal) -> Option<Decimal> {
        if total_amount_credited.is_zero() {
            return None;
        }
        tds_deducted
            .checked_mul(Decimal::ONE_HUNDRED)?
            .checked_div(total_amount_credited)
    }

    /// Applies a lower deduction certificate: the realized rate replaces the
    /// statutory one only when it is strictly smaller. A missing statutory rate
    /// compares as zero.
    #[must_use]
    pub fn effective_rate(
        statutory: Option<Decimal>,
        tds_deducted: Decimal,
        total_amount_credited: Decimal,
    ) -> Option<Decimal> {
        match Self::realized_rate(tds_deducted, total_amount_credited) {
            Some(realized) if realized < statutory.unwrap_or(Decimal::ZERO) => Some(realized),
            _ => statutory,
        }
    }
}
