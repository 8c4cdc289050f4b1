//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, PlanCache};
use crate::domain::TransitCatalog;
use crate::planner::PlannerConfig;

/// Shared application state.
///
/// Contains everything needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Bus line catalog, loaded at startup
    pub catalog: Arc<TransitCatalog>,

    /// Itinerary planner configuration
    pub config: Arc<PlannerConfig>,

    /// Ranked plans by origin and destination
    pub cache: Arc<PlanCache>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: TransitCatalog, config: PlannerConfig, cache_config: &CacheConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
            cache: Arc::new(PlanCache::new(cache_config)),
        }
    }
}
