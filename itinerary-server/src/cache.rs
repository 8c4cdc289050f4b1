//! Caching layer for planned itineraries.
//!
//! The catalog is loaded once and never changes while the server runs, so a
//! plan depends only on its origin and destination. Keys are the exact bit
//! patterns of both coordinates: only identical requests share an entry.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::planner::{PlanRequest, PlanResult};

/// Cache key: latitude and longitude bits of origin, then destination.
type PlanKey = [u64; 4];

/// Cached plan entry.
type PlanEntry = Arc<PlanResult>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
        }
    }
}

/// Cache for planner results.
pub struct PlanCache {
    plans: MokaCache<PlanKey, PlanEntry>,
}

impl PlanCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let plans = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { plans }
    }

    fn key(request: &PlanRequest) -> PlanKey {
        [
            request.origin.latitude().to_bits(),
            request.origin.longitude().to_bits(),
            request.destination.latitude().to_bits(),
            request.destination.longitude().to_bits(),
        ]
    }

    /// Get a cached plan.
    pub async fn get(&self, request: &PlanRequest) -> Option<PlanEntry> {
        self.plans.get(&Self::key(request)).await
    }

    /// Insert a plan into the cache.
    pub async fn insert(&self, request: &PlanRequest, entry: PlanEntry) {
        self.plans.insert(Self::key(request), entry).await;
    }

    /// Approximate number of cached plans.
    pub fn entry_count(&self) -> u64 {
        self.plans.entry_count()
    }
}
