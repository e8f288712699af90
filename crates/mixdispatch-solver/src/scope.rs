//! Search-level scope.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::stats::SearchStats;

/// Mutable state shared by the search loop and its terminations.
#[derive(Debug, Default)]
pub struct SearchScope {
    stats: SearchStats,
    best_cost: Option<i64>,
    terminate_early_flag: Option<Arc<AtomicBool>>,
}

impl SearchScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_terminate_early_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate_early_flag = Some(flag);
        self
    }

    pub fn start_search(&mut self) {
        self.stats = SearchStats::default();
        self.stats.start();
        self.best_cost = None;
    }

    pub fn elapsed(&self) -> Duration {
        self.stats.elapsed()
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SearchStats {
        &mut self.stats
    }

    pub fn take_stats(&mut self) -> SearchStats {
        self.stats.finish();
        std::mem::take(&mut self.stats)
    }

    /// Cost of the incumbent, if one was found.
    pub fn best_cost(&self) -> Option<i64> {
        self.best_cost
    }

    pub fn set_best_cost(&mut self, cost: i64) {
        self.best_cost = Some(cost);
        self.stats.record_solution();
    }

    pub fn node_count(&self) -> u64 {
        self.stats.nodes
    }

    pub fn solution_count(&self) -> u64 {
        self.stats.solutions
    }

    /// Whether the owning solver asked to stop.
    pub fn is_terminate_early(&self) -> bool {
        self.terminate_early_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}
