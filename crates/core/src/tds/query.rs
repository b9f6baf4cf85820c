//! Ledger entry selection for the TDS report.
//!
//! The data layer translates a [`TdsEntryQuery`] into SQL; [`TdsEntryQuery::matches`]
//! states the same criteria over in-memory entries.

use chrono::NaiveDate;

use super::types::{GlEntry, TdsFilters};

/// Which entries, besides the date range, identify a withholding voucher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryScope {
    /// Entries posted to a TDS account whose counterparty is not a bank account.
    TdsAccounts {
        /// The company's TDS liability accounts.
        accounts: Vec<String>,
        /// Bank accounts; their counter-legs are not supplier transactions.
        excluded_counterparties: Vec<String>,
    },
    /// Entries whose party or counterparty is the given supplier, on any account.
    Supplier(String),
}

/// Criteria selecting the ledger entries that identify report vouchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TdsEntryQuery {
    /// First posting date, inclusive.
    pub from_date: NaiveDate,
    /// Last posting date, inclusive.
    pub to_date: NaiveDate,
    /// Account or supplier restriction.
    pub scope: EntryScope,
}

impl TdsEntryQuery {
    /// Builds the selection for the given filters.
    ///
    /// A supplier filter replaces the account and bank restrictions.
    #[must_use]
    pub fn new(filters: &TdsFilters, tds_accounts: Vec<String>, bank_accounts: Vec<String>) -> Self {
        let scope = match filters.supplier() {
            Some(supplier) => EntryScope::Supplier(supplier.to_string()),
            None => EntryScope::TdsAccounts {
                accounts: tds_accounts,
                excluded_counterparties: bank_accounts,
            },
        };
        Self {
            from_date: filters.from_date,
            to_date: filters.to_date,
            scope,
        }
    }

    /// Whether the selection can match anything at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.scope {
            EntryScope::TdsAccounts { accounts, .. } => accounts.is_empty(),
            EntryScope::Supplier(_) => false,
        }
    }

    /// Returns true if the entry identifies a voucher for the report.
    #[must_use]
    pub fn matches(&self, entry: &GlEntry) -> bool {
        if entry.is_cancelled
            || entry.posting_date < self.from_date
            || entry.posting_date > self.to_date
        {
            return false;
        }

        match &self.scope {
            EntryScope::TdsAccounts {
                accounts,
                excluded_counterparties,
            } => {
                let against_bank = entry
                    .against
                    .as_ref()
                    .is_some_and(|against| excluded_counterparties.contains(against));
                accounts.contains(&entry.account) && !against_bank
            }
            EntryScope::Supplier(supplier) => {
                entry.against.as_deref() == Some(supplier.as_str())
                    || entry.party.as_deref() == Some(supplier.as_str())
            }
        }
    }
}
