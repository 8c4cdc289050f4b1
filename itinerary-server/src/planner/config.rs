//! Planner configuration.

use std::time::Duration;

use super::search::PlanError;

/// How far a traveller may walk to a boarding stop or from an alighting stop (meters).
pub const MAX_WALKING_DISTANCE: f64 = 1500.0;

/// How far a traveller may walk between two stops when changing lines (meters).
pub const MAX_TRANSFER_DISTANCE: f64 = 600.0;

/// Deepest transfer tier the planner knows how to search.
pub const MAX_TRANSFERS: usize = 2;

/// Configuration parameters for itinerary planning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Maximum walk to the first stop or from the last stop (meters).
    /// Also bounds the walking-only shortcut.
    pub max_walking_m: f64,

    /// Maximum walk between two stops during a transfer (meters).
    pub max_transfer_m: f64,

    /// Maximum number of transfers, at most [`MAX_TRANSFERS`].
    pub max_transfers: usize,

    /// Maximum number of itineraries to return. `None` returns all of them.
    pub max_results: Option<usize>,

    /// Wall-clock budget for one planning call.
    /// Checked between lines, line pairs and line triples.
    pub time_budget: Option<Duration>,

    /// Fan the transfer tiers out across the rayon thread pool.
    /// Results are identical to a sequential run.
    pub parallel: bool,
}

impl PlannerConfig {
    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), PlanError> {
        if !self.max_walking_m.is_finite() || self.max_walking_m < 0.0 {
            return Err(PlanError::InvalidRequest(
                "walking threshold must be a non-negative distance".to_string(),
            ));
        }
        if !self.max_transfer_m.is_finite() || self.max_transfer_m < 0.0 {
            return Err(PlanError::InvalidRequest(
                "transfer threshold must be a non-negative distance".to_string(),
            ));
        }
        if self.max_transfers > MAX_TRANSFERS {
            return Err(PlanError::InvalidRequest(format!(
                "at most {MAX_TRANSFERS} transfers are supported"
            )));
        }
        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_walking_m: MAX_WALKING_DISTANCE,
            max_transfer_m: MAX_TRANSFER_DISTANCE,
            max_transfers: MAX_TRANSFERS,
            max_results: None,
            time_budget: None,
            parallel: true,
        }
    }
}
