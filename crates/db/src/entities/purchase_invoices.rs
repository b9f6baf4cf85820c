//! `SeaORM` Entity for purchase_invoices table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub supplier: String,
    pub company: String,
    pub posting_date: Date,
    pub tax_withholding_category: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((18, 6)))", nullable)]
    pub base_tax_withholding_net_total: Option<Decimal>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
