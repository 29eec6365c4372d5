//! # Contas API
//!
//! Main entry point for the ledger service.

use anyhow::Context;
use contas_api::api::rest::{AppState, create_router};
use contas_api::config::{AppConfig, LogConfig, LogFormat, StorageBackend};
use contas_api::infrastructure::persistence::Store;
use contas_api::infrastructure::persistence::in_memory::InMemoryStore;
use contas_api::infrastructure::persistence::postgres::PostgresStore;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    init_tracing(&config.log);
    config.validate().context("validating configuration")?;

    info!(
        service = %config.service_name,
        environment = %config.environment,
        "Starting contas-api v{}",
        env!("CARGO_PKG_VERSION")
    );

    let store = open_store(&config).await?;
    let state = Arc::new(AppState::new(store, config.ledger.quota()));
    let router = create_router(state, &config.rest);

    let addr = config.rest.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "REST server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down contas-api");
    Ok(())
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(log.include_target);
    match log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn Store>> {
    match config.database.backend {
        StorageBackend::Memory => {
            warn!("using in-memory storage; data is lost on restart");
            Ok(Arc::new(InMemoryStore::new()))
        }
        StorageBackend::Postgres => {
            let store =
                PostgresStore::connect(&config.database.url, &config.database.pool_settings())
                    .await
                    .context("connecting to PostgreSQL")?;
            if config.database.run_migrations {
                store.migrate().await.context("running migrations")?;
            }
            Ok(Arc::new(store))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
    }
}
