//! `SeaORM` Entity for gl_entries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "gl_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company: String,
    pub posting_date: Date,
    pub account: String,
    #[sea_orm(column_type = "Decimal(Some((18, 6)))")]
    pub debit: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 6)))")]
    pub credit: Decimal,
    pub voucher_type: String,
    pub voucher_no: String,
    pub against: Option<String>,
    pub party_type: Option<String>,
    pub party: Option<String>,
    pub is_cancelled: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
