//! TDS repository: loads everything the TDS payable report aggregates.
//!
//! One call resolves the withholding accounts, selects the matching vouchers and
//! joins their metadata, instead of one lookup per voucher type in the caller.

use std::collections::{HashMap, HashSet};

use khata_core::tds::{
    EntryScope, GlEntry, SupplierInfo, TdsDataset, TdsEntryQuery, TdsFilters, VoucherMeta,
    VoucherType,
};
use khata_shared::TaxIdField;
use sea_orm::sea_query::{Alias, Expr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect,
};
use tracing::debug;

use crate::entities::{
    accounts, gl_entries, journal_entries, journal_entry_accounts, payment_entries,
    purchase_invoices, suppliers, tax_withholding_accounts, tax_withholding_rates,
};

/// Account type marking bank accounts.
const BANK_ACCOUNT_TYPE: &str = "Bank";

/// Party type of supplier lines on journal entries.
const SUPPLIER_PARTY_TYPE: &str = "Supplier";

/// Error types for TDS report queries.
#[derive(Debug, thiserror::Error)]
pub enum TdsRepositoryError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

#[derive(Debug, FromQueryResult)]
struct SupplierRow {
    name: String,
    tax_id: Option<String>,
    supplier_name: String,
    supplier_type: Option<String>,
    tax_withholding_category: Option<String>,
}

/// Repository for TDS report queries.
#[derive(Debug, Clone)]
pub struct TdsRepository {
    db: DatabaseConnection,
    tax_id_field: TaxIdField,
}

impl TdsRepository {
    /// Creates a new TDS repository reading supplier tax ids from `tax_id_field`.
    #[must_use]
    pub const fn new(db: DatabaseConnection, tax_id_field: TaxIdField) -> Self {
        Self { db, tax_id_field }
    }

    /// Loads the report dataset for the given filters.
    ///
    /// # Errors
    ///
    /// Returns an error if any database query fails.
    pub async fn load_dataset(&self, filters: &TdsFilters) -> Result<TdsDataset, TdsRepositoryError> {
        let tds_accounts = self.tds_accounts(filters.company()).await?;
        let bank_accounts = self.bank_accounts().await?;
        let query = TdsEntryQuery::new(filters, tds_accounts.clone(), bank_accounts);

        let mut dataset = TdsDataset {
            tds_accounts: tds_accounts.into_iter().collect(),
            ..TdsDataset::default()
        };

        if query.is_empty() {
            debug!(company = ?filters.company(), "No TDS accounts configured");
            return Ok(dataset);
        }

        let matched = self.matched_vouchers(&query).await?;
        if matched.is_empty() {
            return Ok(dataset);
        }

        dataset.vouchers = self.voucher_meta(&matched).await?;
        let voucher_nos: Vec<String> = matched.into_iter().map(|(no, _)| no).collect();
        dataset.entries = self.voucher_entries(&voucher_nos).await?;

        let mut parties: HashSet<String> = dataset
            .entries
            .iter()
            .filter_map(|e| e.counterparty().map(str::to_string))
            .collect();
        parties.extend(
            dataset
                .vouchers
                .values()
                .flat_map(|m| m.journal_parties.iter().cloned()),
        );
        dataset.suppliers = self.suppliers(parties).await?;
        dataset.rates = self.rates(filters).await?;

        debug!(
            vouchers = voucher_nos.len(),
            entries = dataset.entries.len(),
            suppliers = dataset.suppliers.len(),
            "Loaded TDS dataset"
        );

        Ok(dataset)
    }

    /// Returns the TDS liability accounts of `company`, or of every company.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn tds_accounts(&self, company: Option<&str>) -> Result<Vec<String>, DbErr> {
        let mut query = tax_withholding_accounts::Entity::find()
            .select_only()
            .column(tax_withholding_accounts::Column::Account)
            .distinct();
        if let Some(company) = company {
            query = query.filter(tax_withholding_accounts::Column::Company.eq(company));
        }
        query.into_tuple::<String>().all(&self.db).await
    }

    /// Returns all non-group bank accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn bank_accounts(&self) -> Result<Vec<String>, DbErr> {
        accounts::Entity::find()
            .select_only()
            .column(accounts::Column::Name)
            .filter(accounts::Column::IsGroup.eq(false))
            .filter(accounts::Column::AccountType.eq(BANK_ACCOUNT_TYPE))
            .into_tuple::<String>()
            .all(&self.db)
            .await
    }

    async fn matched_vouchers(
        &self,
        query: &TdsEntryQuery,
    ) -> Result<Vec<(String, VoucherType)>, DbErr> {
        let rows = gl_entries::Entity::find()
            .select_only()
            .column(gl_entries::Column::VoucherNo)
            .column(gl_entries::Column::VoucherType)
            .distinct()
            .filter(entry_condition(query))
            .into_tuple::<(String, String)>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(no, voucher_type)| (no, VoucherType::from(voucher_type)))
            .collect())
    }

    async fn voucher_meta(
        &self,
        matched: &[(String, VoucherType)],
    ) -> Result<HashMap<String, VoucherMeta>, DbErr> {
        let of_type = |wanted: &VoucherType| -> Vec<String> {
            matched
                .iter()
                .filter(|(_, t)| t == wanted)
                .map(|(no, _)| no.clone())
                .collect()
        };
        let invoices = of_type(&VoucherType::PurchaseInvoice);
        let payments = of_type(&VoucherType::PaymentEntry);
        let journals = of_type(&VoucherType::JournalEntry);

        let mut meta: HashMap<String, VoucherMeta> = HashMap::new();

        if !invoices.is_empty() {
            for pi in purchase_invoices::Entity::find()
                .filter(purchase_invoices::Column::Name.is_in(invoices))
                .all(&self.db)
                .await?
            {
                meta.insert(
                    pi.name,
                    VoucherMeta {
                        tax_withholding_category: pi.tax_withholding_category,
                        net_total: pi.base_tax_withholding_net_total,
                        journal_parties: Vec::new(),
                    },
                );
            }
        }

        if !payments.is_empty() {
            for pe in payment_entries::Entity::find()
                .filter(payment_entries::Column::Name.is_in(payments))
                .all(&self.db)
                .await?
            {
                meta.insert(
                    pe.name,
                    VoucherMeta {
                        tax_withholding_category: pe.tax_withholding_category,
                        ..VoucherMeta::default()
                    },
                );
            }
        }

        if !journals.is_empty() {
            for je in journal_entries::Entity::find()
                .filter(journal_entries::Column::Name.is_in(journals.clone()))
                .all(&self.db)
                .await?
            {
                meta.insert(
                    je.name,
                    VoucherMeta {
                        tax_withholding_category: je.tax_withholding_category,
                        ..VoucherMeta::default()
                    },
                );
            }

            let lines = journal_entry_accounts::Entity::find()
                .select_only()
                .column(journal_entry_accounts::Column::Parent)
                .column(journal_entry_accounts::Column::Party)
                .filter(journal_entry_accounts::Column::Parent.is_in(journals))
                .filter(journal_entry_accounts::Column::PartyType.eq(SUPPLIER_PARTY_TYPE))
                .filter(journal_entry_accounts::Column::Party.is_not_null())
                .filter(journal_entry_accounts::Column::Party.ne(""))
                .order_by_asc(journal_entry_accounts::Column::Parent)
                .order_by_asc(journal_entry_accounts::Column::Idx)
                .into_tuple::<(String, String)>()
                .all(&self.db)
                .await?;

            for (parent, party) in lines {
                meta.entry(parent).or_default().journal_parties.push(party);
            }
        }

        Ok(meta)
    }

    async fn voucher_entries(&self, voucher_nos: &[String]) -> Result<Vec<GlEntry>, DbErr> {
        let rows = gl_entries::Entity::find()
            .filter(gl_entries::Column::VoucherNo.is_in(voucher_nos.iter().map(String::as_str)))
            .filter(gl_entries::Column::IsCancelled.eq(false))
            .order_by_asc(gl_entries::Column::PostingDate)
            .order_by_asc(gl_entries::Column::CreatedAt)
            .order_by_asc(gl_entries::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| GlEntry {
                voucher_no: row.voucher_no,
                voucher_type: VoucherType::from(row.voucher_type),
                account: row.account,
                debit: row.debit,
                credit: row.credit,
                posting_date: row.posting_date,
                against: row.against,
                party: row.party,
                is_cancelled: row.is_cancelled,
            })
            .collect())
    }

    async fn suppliers(
        &self,
        names: HashSet<String>,
    ) -> Result<HashMap<String, SupplierInfo>, DbErr> {
        if names.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = suppliers::Entity::find()
            .select_only()
            .column(suppliers::Column::Name)
            .column_as(
                Expr::col(Alias::new(self.tax_id_field.fieldname())),
                "tax_id",
            )
            .column(suppliers::Column::SupplierName)
            .column(suppliers::Column::SupplierType)
            .column(suppliers::Column::TaxWithholdingCategory)
            .filter(suppliers::Column::Name.is_in(names))
            .into_model::<SupplierRow>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let info = SupplierInfo {
                    name: row.name.clone(),
                    tax_id: row.tax_id,
                    supplier_name: Some(row.supplier_name),
                    supplier_type: row.supplier_type,
                    tax_withholding_category: row.tax_withholding_category,
                };
                (row.name, info)
            })
            .collect())
    }

    /// Statutory rate per category for rates covering the whole period.
    ///
    /// When several rates qualify, the one with the latest start date wins.
    async fn rates(
        &self,
        filters: &TdsFilters,
    ) -> Result<HashMap<String, rust_decimal::Decimal>, DbErr> {
        let rows = tax_withholding_rates::Entity::find()
            .filter(tax_withholding_rates::Column::FromDate.lte(filters.from_date))
            .filter(tax_withholding_rates::Column::ToDate.gte(filters.to_date))
            .order_by_asc(tax_withholding_rates::Column::FromDate)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|r| (r.category, r.rate)).collect())
    }
}

/// Translates the entry selection into a SQL condition.
fn entry_condition(query: &TdsEntryQuery) -> Condition {
    let condition = Condition::all()
        .add(gl_entries::Column::IsCancelled.eq(false))
        .add(gl_entries::Column::PostingDate.between(query.from_date, query.to_date));

    match &query.scope {
        EntryScope::TdsAccounts {
            accounts,
            excluded_counterparties,
        } => {
            let condition = condition.add(gl_entries::Column::Account.is_in(accounts.clone()));
            if excluded_counterparties.is_empty() {
                condition
            } else {
                condition.add(
                    Condition::any()
                        .add(gl_entries::Column::Against.is_null())
                        .add(gl_entries::Column::Against.is_not_in(excluded_counterparties.clone())),
                )
            }
        }
        EntryScope::Supplier(supplier) => condition.add(
            Condition::any()
                .add(gl_entries::Column::Against.eq(supplier.as_str()))
                .add(gl_entries::Column::Party.eq(supplier.as_str())),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sea_orm::{DbBackend, QueryTrait};

    fn filters(supplier: Option<&str>) -> TdsFilters {
        TdsFilters {
            from_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            company: Some("Acme".to_string()),
            supplier: supplier.map(str::to_string),
            naming_series: None,
        }
    }

    fn sql_for(query: &TdsEntryQuery) -> String {
        gl_entries::Entity::find()
            .filter(entry_condition(query))
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_account_scope_condition() {
        let query = TdsEntryQuery::new(
            &filters(None),
            vec!["TDS Payable - A".to_string()],
            vec!["Bank - A".to_string()],
        );
        let sql = sql_for(&query);

        assert!(sql.contains(r#""gl_entries"."is_cancelled""#), "{sql}");
        assert!(sql.contains(r#""gl_entries"."posting_date" BETWEEN"#), "{sql}");
        assert!(sql.contains(r#""gl_entries"."account" IN ('TDS Payable - A')"#), "{sql}");
        assert!(sql.contains(r#""gl_entries"."against" NOT IN ('Bank - A')"#), "{sql}");
        assert!(sql.contains(r#""gl_entries"."against" IS NULL"#), "{sql}");
    }

    #[test]
    fn test_account_scope_without_banks_skips_exclusion() {
        let query = TdsEntryQuery::new(&filters(None), vec!["TDS Payable - A".to_string()], Vec::new());
        let sql = sql_for(&query);
        assert!(!sql.contains("NOT IN"), "{sql}");
    }

    #[test]
    fn test_supplier_scope_condition() {
        let query = TdsEntryQuery::new(
            &filters(Some("Globex")),
            vec!["TDS Payable - A".to_string()],
            vec!["Bank - A".to_string()],
        );
        let sql = sql_for(&query);

        assert!(sql.contains(r#""gl_entries"."against" = 'Globex'"#), "{sql}");
        assert!(sql.contains(r#""gl_entries"."party" = 'Globex'"#), "{sql}");
        assert!(!sql.contains(r#""gl_entries"."account" IN"#), "{sql}");
    }
}
