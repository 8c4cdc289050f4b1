//! Tiered itinerary search.
//!
//! Runs the walking shortcut, then direct rides, then one-transfer
//! itineraries, and only falls back to two-transfer itineraries when no
//! candidate so far keeps walking within the threshold. All candidates are
//! ranked together.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::domain::{GeoPoint, Itinerary, TransitCatalog, TransitLine};

use super::config::PlannerConfig;
use super::direct::find_direct;
use super::double_transfer::find_double_transfer;
use super::rank::rank_itineraries;
use super::single_transfer::find_single_transfer;

/// Error from itinerary planning.
///
/// Finding nothing is not an error; it is an empty result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// Invalid planning request or configuration
    #[error("invalid plan request: {0}")]
    InvalidRequest(String),

    /// The caller cancelled the search
    #[error("search cancelled")]
    Cancelled,

    /// The search ran past its time budget
    #[error("search timed out")]
    Timeout,
}

/// Request for itinerary planning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanRequest {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
}

impl PlanRequest {
    /// Create a new plan request.
    pub fn new(origin: GeoPoint, destination: GeoPoint) -> Self {
        Self {
            origin,
            destination,
        }
    }
}

/// Counters describing how much work a search did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Lines searched for direct rides.
    pub lines_searched: usize,
    /// Ordered line pairs searched for one-transfer itineraries.
    pub pairs_searched: usize,
    /// Ordered line triples searched for two-transfer itineraries.
    pub triples_searched: usize,
    /// Lines left out of the search because they are malformed.
    pub lines_skipped: usize,
    /// Whether the two-transfer fallback ran at all.
    pub double_transfer_ran: bool,
}

/// Result of itinerary planning.
#[derive(Debug, Clone)]
pub struct PlanResult {
    /// Found itineraries, ranked best-first.
    pub itineraries: Vec<Itinerary>,

    /// Work done by the search.
    pub stats: SearchStats,
}

impl PlanResult {
    /// Create an empty result.
    pub fn empty() -> Self {
        Self {
            itineraries: Vec::new(),
            stats: SearchStats::default(),
        }
    }
}

/// Cooperative cancellation flag shared between a caller and a running search.
///
/// Cloning yields a handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask any search holding this token to stop.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Stop conditions checked between outer-loop iterations.
struct Interrupt<'a> {
    cancel: &'a CancelToken,
    deadline: Option<Instant>,
}

impl Interrupt<'_> {
    fn triggered(&self) -> Option<PlanError> {
        if self.cancel.is_cancelled() {
            return Some(PlanError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(PlanError::Timeout),
            _ => None,
        }
    }

    fn should_stop(&self) -> bool {
        self.triggered().is_some()
    }

    fn check(&self) -> Result<(), PlanError> {
        self.triggered().map_or(Ok(()), Err)
    }
}

/// Thread-safe work counters, read out into [`SearchStats`] at the end.
#[derive(Default)]
struct Counters {
    lines: AtomicUsize,
    pairs: AtomicUsize,
    triples: AtomicUsize,
}

impl Counters {
    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Itinerary planner over one catalog snapshot.
///
/// The planner is stateless between calls; every call reads the catalog
/// and builds fresh itineraries.
pub struct Planner<'a> {
    catalog: &'a TransitCatalog,
    config: &'a PlannerConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(catalog: &'a TransitCatalog, config: &'a PlannerConfig) -> Self {
        Self { catalog, config }
    }

    /// Plan itineraries from origin to destination.
    pub fn plan(&self, request: &PlanRequest) -> Result<PlanResult, PlanError> {
        self.plan_with_cancel(request, &CancelToken::new())
    }

    /// Plan itineraries, stopping early if `cancel` is triggered.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` for an unusable configuration, `Cancelled`
    /// or `Timeout` if the search was interrupted. No partial results are
    /// returned for an interrupted search.
    pub fn plan_with_cancel(
        &self,
        request: &PlanRequest,
        cancel: &CancelToken,
    ) -> Result<PlanResult, PlanError> {
        self.config.validate()?;

        let interrupt = Interrupt {
            cancel,
            deadline: self.config.time_budget.map(|budget| Instant::now() + budget),
        };
        let counters = Counters::default();

        let (lines, lines_skipped) = self.routable_lines();
        let origin = &request.origin;
        let destination = &request.destination;
        let mut candidates = Vec::new();

        // Walking shortcut: always offered for nearby points
        let direct_distance = origin.distance_to(destination);
        if direct_distance <= self.config.max_walking_m {
            debug!(distance = direct_distance, "destination within walking distance");
            candidates.push(Itinerary::walking(*origin, *destination));
        }

        // Direct rides: O(lines)
        let direct = self.fan_out(lines.len(), |a| {
            if interrupt.should_stop() {
                return Vec::new();
            }
            Counters::bump(&counters.lines);
            find_direct(lines[a], origin, destination, self.config.max_walking_m)
                .into_iter()
                .collect()
        });
        interrupt.check()?;
        debug!(found = direct.len(), "direct tier complete");
        candidates.extend(direct);

        // One transfer: O(lines²)
        if self.config.max_transfers >= 1 {
            let single = self.fan_out(lines.len(), |a| {
                (0..lines.len())
                    .filter(|&b| b != a)
                    .filter_map(|b| {
                        if interrupt.should_stop() {
                            return None;
                        }
                        Counters::bump(&counters.pairs);
                        find_single_transfer(
                            lines[a],
                            lines[b],
                            origin,
                            destination,
                            self.config.max_walking_m,
                            self.config.max_transfer_m,
                        )
                    })
                    .collect()
            });
            interrupt.check()?;
            debug!(found = single.len(), "one-transfer tier complete");
            candidates.extend(single);
        }

        // Two transfers: O(lines³), only when nothing cheaper is acceptable
        let double_transfer_ran =
            self.config.max_transfers >= 2 && self.needs_fallback(&candidates);
        if double_transfer_ran {
            debug!("no walkable candidate yet, searching two-transfer itineraries");
            let double = self.double_transfer_tier(&lines, request, &interrupt, &counters)?;
            debug!(found = double.len(), "two-transfer tier complete");
            candidates.extend(double);
        }

        let mut itineraries = rank_itineraries(candidates);
        if let Some(max) = self.config.max_results {
            itineraries.truncate(max);
        }

        let stats = SearchStats {
            lines_searched: counters.lines.into_inner(),
            pairs_searched: counters.pairs.into_inner(),
            triples_searched: counters.triples.into_inner(),
            lines_skipped,
            double_transfer_ran,
        };
        info!(
            origin = %origin,
            destination = %destination,
            itineraries = itineraries.len(),
            pairs = stats.pairs_searched,
            triples = stats.triples_searched,
            "plan complete"
        );

        Ok(PlanResult { itineraries, stats })
    }

    /// Every ordered triple of distinct lines, checking for interruption
    /// before each one.
    fn double_transfer_tier(
        &self,
        lines: &[&TransitLine],
        request: &PlanRequest,
        interrupt: &Interrupt<'_>,
        counters: &Counters,
    ) -> Result<Vec<Itinerary>, PlanError> {
        let found = self.fan_out(lines.len(), |a| {
            let mut found = Vec::new();
            for b in (0..lines.len()).filter(|&b| b != a) {
                for c in (0..lines.len()).filter(|&c| c != a && c != b) {
                    if interrupt.should_stop() {
                        return found;
                    }
                    Counters::bump(&counters.triples);
                    found.extend(find_double_transfer(
                        lines[a],
                        lines[b],
                        lines[c],
                        &request.origin,
                        &request.destination,
                        self.config.max_walking_m,
                        self.config.max_transfer_m,
                    ));
                }
            }
            found
        });
        interrupt.check()?;
        Ok(found)
    }

    /// Lines that can take part in the search, and how many were left out.
    fn routable_lines(&self) -> (Vec<&'a TransitLine>, usize) {
        let mut skipped = 0;
        let lines = self
            .catalog
            .lines()
            .iter()
            .filter(|line| match line.ensure_routable() {
                Ok(()) => true,
                Err(e) => {
                    warn!(line = %line.id(), error = %e, "skipping malformed line");
                    skipped += 1;
                    false
                }
            })
            .collect();
        (lines, skipped)
    }

    /// The two-transfer tier runs when there is no candidate at all, or
    /// every candidate walks further than the walking threshold.
    fn needs_fallback(&self, candidates: &[Itinerary]) -> bool {
        candidates
            .iter()
            .all(|c| c.total_walking() > self.config.max_walking_m)
    }

    /// Run `search` for every outer line index and concatenate the results
    /// in index order, in parallel if configured.
    fn fan_out<F>(&self, outer: usize, search: F) -> Vec<Itinerary>
    where
        F: Fn(usize) -> Vec<Itinerary> + Sync + Send,
    {
        if self.config.parallel {
            (0..outer).into_par_iter().flat_map_iter(&search).collect()
        } else {
            (0..outer).flat_map(&search).collect()
        }
    }
}
