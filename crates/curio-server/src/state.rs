//! Shared application state.

use curio_core::CurioConfig;
use curio_pipeline::Recommender;

/// Shared application state accessible from all route handlers.
///
/// Built once at startup; every field is read-only for the life of the
/// process, so no interior locking is needed.
pub struct AppState {
    pub config: CurioConfig,
    pub recommender: Recommender,
}

impl AppState {
    pub fn new(config: CurioConfig, recommender: Recommender) -> Self {
        Self {
            config,
            recommender,
        }
    }
}
