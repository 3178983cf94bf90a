//! Application state for the FoodCheck server
//!
//! Holds the prediction service, initialized once at startup and shared
//! read-only across all in-flight requests. Nothing here is mutated after
//! construction.

use std::sync::Arc;
use std::time::Instant;

use foodcheck::backend::DefaultBackend;
use foodcheck::inference::FreshnessService;

/// Shared application state
pub struct AppState {
    /// The immutable prediction service
    pub service: FreshnessService<DefaultBackend>,
    /// Server start time
    pub started_at: Instant,
}

impl AppState {
    pub fn new(service: FreshnessService<DefaultBackend>) -> Self {
        Self {
            service,
            started_at: Instant::now(),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

pub type SharedState = Arc<AppState>;
