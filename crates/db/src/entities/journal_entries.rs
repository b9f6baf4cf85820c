//! `SeaORM` Entity for journal_entries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub company: String,
    pub posting_date: Date,
    pub tax_withholding_category: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::journal_entry_accounts::Entity")]
    JournalEntryAccounts,
}

impl Related<super::journal_entry_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntryAccounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
