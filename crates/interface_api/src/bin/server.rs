//! Water Billing - API Server Binary
//!
//! This binary starts the HTTP API server for water consumption billing.
//!
//! # Usage
//!
//! ```bash
//! # Run against PostgreSQL
//! API_DATABASE_URL=postgres://... cargo run --bin water-billing-api
//!
//! # Run with a process-local store
//! API_STORAGE=memory cargo run --bin water-billing-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DATABASE_URL` - PostgreSQL connection string (`DATABASE_URL` is also read)
//! * `API_STORAGE` - `postgres` or `memory` (default: postgres)
//! * `API_ROUNDING` - `half_even` or `half_away_from_zero` (default: half_even)
//! * `API_LOG_LEVEL` - Log level or filter directive (default: info)
//! * `API_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! * `API_DB_MAX_CONNECTIONS`, `API_DB_MIN_CONNECTIONS` - Pool sizing

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_billing::adapters::InMemoryInvoiceStore;
use domain_billing::{ConsumptionLedger, InvoiceStore};
use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresInvoiceStore};
use interface_api::config::{ApiConfig, LogFormat, StorageBackend};
use interface_api::create_router;

/// Main entry point for the API server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - Database connection or migration fails
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config()?;

    init_tracing(&config.log_level, config.log_format);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        storage = ?config.storage,
        rounding = ?config.rounding,
        "Starting water billing API server"
    );

    let store = create_store(&config).await?;
    let ledger = ConsumptionLedger::new(store).with_rounding(config.rounding);

    let app = create_router(ledger, config.clone());

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// A bare `DATABASE_URL` is honoured when `API_DATABASE_URL` is not set.
fn load_config() -> anyhow::Result<ApiConfig> {
    let mut config = ApiConfig::from_env().context("Invalid API configuration")?;

    if std::env::var("API_DATABASE_URL").is_err() {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database_url = url;
        }
    }

    Ok(config)
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
    }
}

/// Builds the configured invoice store, migrating the schema for PostgreSQL.
async fn create_store(config: &ApiConfig) -> anyhow::Result<Arc<dyn InvoiceStore>> {
    match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; records are lost on restart");
            Ok(Arc::new(InMemoryInvoiceStore::new()))
        }
        StorageBackend::Postgres => {
            let pool = create_pool(
                DatabaseConfig::new(config.database_url.clone())
                    .max_connections(config.db_max_connections)
                    .min_connections(config.db_min_connections),
            )
            .await
            .context("Failed to connect to database")?;

            run_migrations(&pool).await?;

            Ok(Arc::new(PostgresInvoiceStore::new(pool)))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// In-flight requests complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
