//! Defaults repository: the database-backed settings store.

use async_trait::async_trait;
use chrono::Utc;
use khata_core::settings::{SettingsError, SettingsStore};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, Set};
use tracing::debug;

use crate::entities::global_defaults;

/// Reads and writes `global_defaults` through any connection or transaction.
#[derive(Debug)]
pub struct DefaultsRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> DefaultsRepository<'a, C> {
    /// Creates a new defaults repository.
    #[must_use]
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Returns the stored value for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get(&self, key: &str) -> Result<Option<String>, DbErr> {
        Ok(global_defaults::Entity::find_by_id(key.to_string())
            .one(self.conn)
            .await?
            .map(|row| row.value))
    }

    /// Inserts or replaces the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), DbErr> {
        let row = global_defaults::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            updated_at: Set(Utc::now().fixed_offset()),
        };

        global_defaults::Entity::insert(row)
            .on_conflict(
                OnConflict::column(global_defaults::Column::Key)
                    .update_columns([
                        global_defaults::Column::Value,
                        global_defaults::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.conn)
            .await?;

        debug!(key, "Default stored");
        Ok(())
    }
}

#[async_trait]
impl<C: ConnectionTrait> SettingsStore for DefaultsRepository<'_, C> {
    async fn get_default(&self, key: &str) -> Result<Option<String>, SettingsError> {
        self.get(key)
            .await
            .map_err(|e| SettingsError::Store(e.to_string()))
    }

    async fn set_default(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.set(key, value)
            .await
            .map_err(|e| SettingsError::Store(e.to_string()))
    }
}
