//! Schema capability probes, run once at startup.

use khata_shared::TaxIdField;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Statement};
use tracing::info;

const COLUMN_EXISTS_SQL: &str = r"
SELECT 1 AS present
FROM information_schema.columns
WHERE table_schema = current_schema() AND table_name = $1 AND column_name = $2
";

/// Repository for schema introspection.
#[derive(Debug, Clone)]
pub struct SchemaRepository {
    db: DatabaseConnection,
}

impl SchemaRepository {
    /// Creates a new schema repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns true if `table` has a column named `column`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn has_column(&self, table: &str, column: &str) -> Result<bool, DbErr> {
        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            COLUMN_EXISTS_SQL,
            [table.into(), column.into()],
        );
        Ok(self.db.query_one(stmt).await?.is_some())
    }

    /// Resolves which supplier column carries the tax identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn supplier_tax_id_field(&self) -> Result<TaxIdField, DbErr> {
        let field = if self.has_column("suppliers", TaxIdField::Pan.fieldname()).await? {
            TaxIdField::Pan
        } else {
            TaxIdField::TaxId
        };
        info!(field = %field, "Resolved supplier tax id column");
        Ok(field)
    }
}
