//! Naming rule repository: persists how record types are named.

use async_trait::async_trait;
use chrono::Utc;
use khata_core::settings::{NamingRule, NamingSeriesConfigurator, SettingsError};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, Set};
use tracing::info;

use crate::entities::doctype_naming_rules;

/// Stores naming rules in `doctype_naming_rules`.
#[derive(Debug)]
pub struct NamingRuleRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> NamingRuleRepository<'a, C> {
    /// Creates a new naming rule repository.
    #[must_use]
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Returns the stored naming configuration of `doctype`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(&self, doctype: &str) -> Result<Option<doctype_naming_rules::Model>, DbErr> {
        doctype_naming_rules::Entity::find_by_id(doctype.to_string())
            .one(self.conn)
            .await
    }

    /// Inserts or replaces the naming configuration for the rule's record type.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn upsert(&self, rule: &NamingRule) -> Result<(), DbErr> {
        let row = doctype_naming_rules::ActiveModel {
            doctype: Set(rule.doctype.clone()),
            name_field: Set(rule.name_field.clone()),
            autoname: Set(rule.autoname()),
            naming_series_reqd: Set(rule.naming_series_required()),
            naming_series_hidden: Set(rule.naming_series_hidden()),
            name_field_reqd: Set(rule.name_field_required()),
            name_field_hidden: Set(rule.name_field_hidden()),
            updated_at: Set(Utc::now().fixed_offset()),
        };

        doctype_naming_rules::Entity::insert(row)
            .on_conflict(
                OnConflict::column(doctype_naming_rules::Column::Doctype)
                    .update_columns([
                        doctype_naming_rules::Column::NameField,
                        doctype_naming_rules::Column::Autoname,
                        doctype_naming_rules::Column::NamingSeriesReqd,
                        doctype_naming_rules::Column::NamingSeriesHidden,
                        doctype_naming_rules::Column::NameFieldReqd,
                        doctype_naming_rules::Column::NameFieldHidden,
                        doctype_naming_rules::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.conn)
            .await?;

        info!(
            doctype = %rule.doctype,
            autoname = %rule.autoname(),
            "Naming rule updated"
        );
        Ok(())
    }
}

#[async_trait]
impl<C: ConnectionTrait> NamingSeriesConfigurator for NamingRuleRepository<'_, C> {
    async fn set_by_naming_series(&self, rule: &NamingRule) -> Result<(), SettingsError> {
        self.upsert(rule)
            .await
            .map_err(|e| SettingsError::NamingRule(e.to_string()))
    }
}
