//! Khata API Server
//!
//! Main entry point for the Khata backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use khata_api::{AppState, create_router};
use khata_db::{SchemaRepository, connect};
use khata_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "khata=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Connect to database
    let db = connect(&config.database).await?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    // Resolve the supplier tax id column once
    let tax_id_field = match config.report.tax_id_field {
        Some(field) => {
            info!(field = %field, "Supplier tax id column set by configuration");
            field
        }
        None => SchemaRepository::new(db.clone()).supplier_tax_id_field().await?,
    };

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        tax_id_field,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
