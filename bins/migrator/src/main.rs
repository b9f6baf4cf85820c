//! Database migration runner for Khata.
//!
//! Usage:
//!   khata-migrate up      - Run all pending migrations
//!   khata-migrate down    - Rollback last migration
//!   khata-migrate status  - Show migration status
//!   khata-migrate fresh   - Drop all tables and re-run migrations
//!
//! The connection string is read from `DATABASE_URL`.

use khata_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Run the migrator CLI (it sets up its own tracing)
    cli::run_cli(Migrator).await;
}
