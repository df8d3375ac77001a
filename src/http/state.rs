//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::services::wait_times::WaitTimeFeed;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for storage operations
    pub repository: Arc<dyn FullRepository>,
    /// Live wait-time source; requests degrade gracefully when it fails
    pub wait_times: Arc<dyn WaitTimeFeed>,
}

impl AppState {
    /// Create application state with the given repository and wait-time feed.
    pub fn new(repository: Arc<dyn FullRepository>, wait_times: Arc<dyn WaitTimeFeed>) -> Self {
        Self {
            repository,
            wait_times,
        }
    }
}
