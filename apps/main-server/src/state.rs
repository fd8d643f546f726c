//! Application state.

use std::sync::Arc;

use schedule_store::ScheduleStore;

use crate::config::Config;

/// Shared application state.
pub struct AppState<S: ScheduleStore> {
    /// Server configuration.
    pub config: Config,
    /// Schedule store.
    pub store: S,
}

impl<S: ScheduleStore> AppState<S> {
    /// Creates new application state.
    pub fn new(config: Config, store: S) -> Self {
        Self { config, store }
    }
}

/// Type alias for shared state.
pub type SharedState<S> = Arc<AppState<S>>;

/// Creates shared state from config and store.
pub fn create_shared_state<S: ScheduleStore>(config: Config, store: S) -> SharedState<S> {
    Arc::new(AppState::new(config, store))
}
