//! Application state.

use heartlog_core::{Analyzer, Config, Store};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
///
/// Holds no per-user session data; every page is selected by its route.
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<Config>,
    /// Flat-file store
    pub store: Store,
    /// Conversation analyzer
    pub analyzer: Analyzer,
    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config, store: Store, analyzer: Analyzer) -> Self {
        Self {
            config: Arc::new(config),
            store,
            analyzer,
            start_time: Instant::now(),
        }
    }
}
