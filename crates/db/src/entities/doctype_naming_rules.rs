//! `SeaORM` Entity for doctype_naming_rules table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "doctype_naming_rules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub doctype: String,
    pub name_field: String,
    pub autoname: String,
    pub naming_series_reqd: bool,
    pub naming_series_hidden: bool,
    pub name_field_reqd: bool,
    pub name_field_hidden: bool,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
