// Application state module
// Shared by every connection for the lifetime of the process

use super::types::Config;
use crate::registry::ActivityStore;

/// Application state
pub struct AppState {
    pub config: Config,
    /// The single activity store all request handlers mutate
    pub store: ActivityStore,
}

impl AppState {
    /// Create `AppState` with the seeded activity list
    pub fn new(config: Config) -> Self {
        Self {
            config,
            store: ActivityStore::seeded(),
        }
    }
}
