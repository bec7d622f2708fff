// Application state module
// Process-wide immutable state shared across connections

use std::path::PathBuf;

use super::types::Config;

/// Application state
///
/// Holds the configuration and the resolved server root. Nothing here is
/// mutated after startup, so request handlers share it behind an `Arc`
/// without locking.
pub struct AppState {
    pub config: Config,
    pub root: PathBuf,
}

impl AppState {
    pub fn new(config: Config, root: PathBuf) -> Self {
        Self { config, root }
    }
}
