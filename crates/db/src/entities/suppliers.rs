//! `SeaORM` Entity for suppliers table.
//!
//! Regional installations may add a `pan` column; it is read dynamically by the
//! TDS repository and therefore not part of the model.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub supplier_name: String,
    pub supplier_type: Option<String>,
    pub supplier_group: Option<String>,
    pub naming_series: Option<String>,
    pub tax_id: Option<String>,
    pub tax_withholding_category: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
