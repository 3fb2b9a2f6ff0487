use std::env;
use std::sync::Arc;

use finance_tracker::clock::{SharedClock, SystemClock};
use finance_tracker::config::{Config, StoreBackend};
use finance_tracker::constants::DEFAULT_LOG_FILTER;
use finance_tracker::database::LibsqlStore;
use finance_tracker::expenses::ExpenseService;
use finance_tracker::handlers;
use finance_tracker::memory::MemoryStore;
use finance_tracker::store::RecordStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // load environment variables
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG")
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
                .as_str(),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(backend = ?config.backend, utc_offset = %config.utc_offset, "configuration loaded");

    let clock: SharedClock = Arc::new(SystemClock::with_offset(config.utc_offset));
    match config.backend {
        StoreBackend::Sqlite => {
            let store = LibsqlStore::open_with_clock(&config.data_path, clock).await?;
            serve(&config, store).await
        }
        StoreBackend::Memory => serve(&config, MemoryStore::with_clock(clock)).await,
    }
}

/// Runs the shell until Ctrl-C. The store is closed on every exit path once
/// it has been opened.
async fn serve<S: RecordStore>(config: &Config, store: S) -> anyhow::Result<()> {
    let service = Arc::new(ExpenseService::new(store));
    let result = run_server(config, Arc::clone(&service)).await;

    if let Err(e) = service.close().await {
        tracing::warn!(error = %e, "failed to close expense store");
    }
    result
}

async fn run_server<S: RecordStore>(
    config: &Config,
    service: Arc<ExpenseService<S>>,
) -> anyhow::Result<()> {
    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server running on http://{}", bind_address);

    axum::serve(listener, handlers::router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
