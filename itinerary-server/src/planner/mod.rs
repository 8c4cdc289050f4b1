//! Itinerary planner using tiered exhaustive search.
//!
//! This module answers: "I'm standing here - which bus lines, and which
//! changes between them, get me to that point with the least walking?"
//!
//! The search is tiered by number of transfers. Direct rides and
//! one-transfer itineraries are always searched; two-transfer itineraries
//! are a fallback for when nothing cheaper keeps walking acceptable.

mod config;
mod direct;
mod double_transfer;
mod rank;
mod scan;
mod search;
mod single_transfer;
mod transfer_index;


pub use config::{MAX_TRANSFER_DISTANCE, MAX_TRANSFERS, MAX_WALKING_DISTANCE, PlannerConfig};
pub use rank::{compare_itineraries, rank_itineraries};
pub use search::{CancelToken, PlanError, PlanRequest, PlanResult, Planner, SearchStats};
pub use transfer_index::{TransferPoint, TransferPointIndex};
