//! Settings migration.
//!
//! Creates the global defaults store and per-doctype naming rules.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(SETTINGS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS doctype_naming_rules CASCADE; DROP TABLE IF EXISTS global_defaults CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const SETTINGS_SQL: &str = r"
-- Process-wide default values (supplier group, price list, ...)
CREATE TABLE global_defaults (
    key VARCHAR(140) PRIMARY KEY,
    value TEXT NOT NULL DEFAULT '',
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Naming behaviour per record type
CREATE TABLE doctype_naming_rules (
    doctype VARCHAR(140) PRIMARY KEY,
    name_field VARCHAR(140) NOT NULL,
    autoname VARCHAR(140) NOT NULL,
    naming_series_reqd BOOLEAN NOT NULL DEFAULT false,
    naming_series_hidden BOOLEAN NOT NULL DEFAULT true,
    name_field_reqd BOOLEAN NOT NULL DEFAULT true,
    name_field_hidden BOOLEAN NOT NULL DEFAULT false,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";
