//! Ledger migration.
//!
//! Creates accounts, suppliers, vouchers, general ledger entries and the tax
//! withholding masters read by the TDS payable report.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: MASTERS
        // ============================================================
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(SUPPLIERS_SQL).await?;
        db.execute_unprepared(TAX_WITHHOLDING_SQL).await?;

        // ============================================================
        // PART 2: VOUCHERS
        // ============================================================
        db.execute_unprepared(VOUCHERS_SQL).await?;

        // ============================================================
        // PART 3: GENERAL LEDGER
        // ============================================================
        db.execute_unprepared(GL_ENTRIES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            r"
DROP TABLE IF EXISTS gl_entries CASCADE;
DROP TABLE IF EXISTS journal_entry_accounts CASCADE;
DROP TABLE IF EXISTS journal_entries CASCADE;
DROP TABLE IF EXISTS payment_entries CASCADE;
DROP TABLE IF EXISTS purchase_invoices CASCADE;
DROP TABLE IF EXISTS tax_withholding_rates CASCADE;
DROP TABLE IF EXISTS tax_withholding_accounts CASCADE;
DROP TABLE IF EXISTS suppliers CASCADE;
DROP TABLE IF EXISTS accounts CASCADE;
",
        )
        .await?;
        Ok(())
    }
}

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    name VARCHAR(140) PRIMARY KEY,
    company VARCHAR(140) NOT NULL,
    is_group BOOLEAN NOT NULL DEFAULT false,
    account_type VARCHAR(64),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Bank account lookup for counterparty exclusion
CREATE INDEX idx_accounts_type ON accounts(account_type) WHERE is_group = false;
";

const SUPPLIERS_SQL: &str = r"
CREATE TABLE suppliers (
    name VARCHAR(140) PRIMARY KEY,
    supplier_name VARCHAR(140) NOT NULL,
    supplier_type VARCHAR(64),
    supplier_group VARCHAR(140),
    naming_series VARCHAR(64),
    tax_id VARCHAR(64),
    tax_withholding_category VARCHAR(140),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const TAX_WITHHOLDING_SQL: &str = r"
CREATE TABLE tax_withholding_accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    category VARCHAR(140) NOT NULL,
    company VARCHAR(140) NOT NULL,
    account VARCHAR(140) NOT NULL REFERENCES accounts(name),
    CONSTRAINT uq_tax_withholding_account UNIQUE (category, company, account)
);

CREATE INDEX idx_tax_withholding_accounts_company ON tax_withholding_accounts(company);

CREATE TABLE tax_withholding_rates (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    category VARCHAR(140) NOT NULL,
    from_date DATE NOT NULL,
    to_date DATE NOT NULL,
    rate NUMERIC(9, 4) NOT NULL,
    CONSTRAINT chk_rate_dates CHECK (from_date <= to_date),
    CONSTRAINT chk_rate_range CHECK (rate >= 0 AND rate <= 100)
);

CREATE INDEX idx_tax_withholding_rates_period ON tax_withholding_rates(from_date, to_date);
";

const VOUCHERS_SQL: &str = r"
CREATE TABLE purchase_invoices (
    name VARCHAR(140) PRIMARY KEY,
    supplier VARCHAR(140) NOT NULL REFERENCES suppliers(name),
    company VARCHAR(140) NOT NULL,
    posting_date DATE NOT NULL,
    tax_withholding_category VARCHAR(140),
    base_tax_withholding_net_total NUMERIC(18, 6),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE payment_entries (
    name VARCHAR(140) PRIMARY KEY,
    party_type VARCHAR(64),
    party VARCHAR(140),
    company VARCHAR(140) NOT NULL,
    posting_date DATE NOT NULL,
    tax_withholding_category VARCHAR(140),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE journal_entries (
    name VARCHAR(140) PRIMARY KEY,
    company VARCHAR(140) NOT NULL,
    posting_date DATE NOT NULL,
    tax_withholding_category VARCHAR(140),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE journal_entry_accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    parent VARCHAR(140) NOT NULL REFERENCES journal_entries(name) ON DELETE CASCADE,
    idx INTEGER NOT NULL,
    account VARCHAR(140) NOT NULL,
    party_type VARCHAR(64),
    party VARCHAR(140),
    debit NUMERIC(18, 6) NOT NULL DEFAULT 0,
    credit NUMERIC(18, 6) NOT NULL DEFAULT 0
);

CREATE INDEX idx_journal_entry_accounts_parent ON journal_entry_accounts(parent, idx);
";

const GL_ENTRIES_SQL: &str = r"
CREATE TABLE gl_entries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company VARCHAR(140) NOT NULL,
    posting_date DATE NOT NULL,
    account VARCHAR(140) NOT NULL REFERENCES accounts(name),
    debit NUMERIC(18, 6) NOT NULL DEFAULT 0,
    credit NUMERIC(18, 6) NOT NULL DEFAULT 0,
    voucher_type VARCHAR(64) NOT NULL,
    voucher_no VARCHAR(140) NOT NULL,
    against TEXT,
    party_type VARCHAR(64),
    party VARCHAR(140),
    is_cancelled BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_gl_non_negative CHECK (debit >= 0 AND credit >= 0)
);

-- Report selection: account within a date range
CREATE INDEX idx_gl_entries_account_date ON gl_entries(account, posting_date) WHERE is_cancelled = false;

-- All entries of a voucher
CREATE INDEX idx_gl_entries_voucher ON gl_entries(voucher_no) WHERE is_cancelled = false;

-- Supplier filter
CREATE INDEX idx_gl_entries_party ON gl_entries(party, posting_date) WHERE is_cancelled = false;
";
