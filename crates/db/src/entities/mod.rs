//! `SeaORM` entity definitions.

pub mod accounts;
pub mod doctype_naming_rules;
pub mod gl_entries;
pub mod global_defaults;
pub mod journal_entries;
pub mod journal_entry_accounts;
pub mod payment_entries;
pub mod purchase_invoices;
pub mod suppliers;
pub mod tax_withholding_accounts;
pub mod tax_withholding_rates;
