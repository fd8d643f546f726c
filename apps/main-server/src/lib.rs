//! OneOnOne Main Server
//!
//! Serves the record-management API over users, contacts, events and
//! timeblocks, plus the administrative contact listing.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

use std::sync::Arc;

use axum::Router;
use schedule_store::{MemoryScheduleStore, ScheduleStore, SqliteScheduleStore};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{Config, StoreBackend};
use crate::state::{AppState, create_shared_state};

/// Creates the application router with all routes configured.
pub fn create_app<S: ScheduleStore + 'static>(state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api::create_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Creates the application state with the given configuration and store.
pub fn create_state<S: ScheduleStore>(config: Config, store: S) -> Arc<AppState<S>> {
    create_shared_state(config, store)
}

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

/// Opens the configured store and serves the API until the listener fails.
pub async fn run(config: Config) -> anyhow::Result<()> {
    match config.store_backend() {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; records are lost on exit");
            serve(config, MemoryScheduleStore::new()).await
        }
        StoreBackend::Sqlite(url) => {
            let store = SqliteScheduleStore::connect(&url).await?;
            serve(config, store).await
        }
    }
}

async fn serve<S: ScheduleStore + 'static>(config: Config, store: S) -> anyhow::Result<()> {
    let state = create_state(config, store);
    let addr: std::net::SocketAddr = state.config.server_addr().parse()?;
    let app = create_app(state);

    tracing::info!(addr = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
