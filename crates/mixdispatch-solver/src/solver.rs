//! Solver entry point.

use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use mixdispatch_config::SolverConfig;
use mixdispatch_core::ProblemInstance;

use crate::event::{SolutionListener, SolveEventSupport};
use crate::model::DispatchModel;
use crate::report::Schedule;
use crate::scope::SearchScope;
use crate::search::{BranchAndBound, Brancher, SearchStatus};
use crate::stats::SearchStats;
use crate::termination::{
    NodeCountTermination, OrTermination, SolutionCountTermination, SolverTermination,
    TimeTermination,
};

/// Result of one solve.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub status: SearchStatus,
    /// Last incumbent; optimal when `status` is [`SearchStatus::Optimal`].
    pub best: Option<Schedule>,
    pub statistics: SearchStats,
}

impl SolveOutcome {
    pub fn is_feasible(&self) -> bool {
        self.best.is_some()
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SearchStatus::Optimal
    }

    pub fn cost(&self) -> Option<i64> {
        self.best.as_ref().map(|s| s.cost)
    }
}

/// Builds the model for an instance and runs branch-and-bound on it.
///
/// # Example
///
/// ```
/// use mixdispatch_config::SolverConfig;
/// use mixdispatch_core::{Order, ProblemInstance, Station, Vehicle};
/// use mixdispatch_solver::Solver;
///
/// let instance = ProblemInstance::new(
///     vec![Order::new("site", 2, 1, 10, 0, 1).with_travel(0, 1, 1)],
///     vec![Vehicle::new("truck", 2, 20, 2)],
///     vec![Station::new("depot", 1)],
/// )
/// .unwrap();
///
/// let outcome = Solver::new(SolverConfig::default()).solve(&instance);
/// assert!(outcome.is_optimal());
/// assert_eq!(outcome.best.unwrap().total_trips(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Solver {
    config: SolverConfig,
    events: SolveEventSupport,
    terminate_early_flag: Arc<AtomicBool>,
    solving: Arc<AtomicBool>,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn SolutionListener>) -> Self {
        self.events.add_listener(listener);
        self
    }

    pub fn add_listener(&mut self, listener: Arc<dyn SolutionListener>) {
        self.events.add_listener(listener);
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Requests early termination of a running solve.
    ///
    /// Thread-safe. Returns false when no solve is in progress.
    pub fn terminate_early(&self) -> bool {
        if self.solving.load(Ordering::SeqCst) {
            self.terminate_early_flag.store(true, Ordering::SeqCst);
            true
        } else {
            false
        }
    }

    /// Flag polled by the search; raising it stops the current solve.
    pub fn terminate_early_handle(&self) -> Arc<AtomicBool> {
        self.terminate_early_flag.clone()
    }

    pub fn is_solving(&self) -> bool {
        self.solving.load(Ordering::SeqCst)
    }

    pub fn solve(&self, instance: &ProblemInstance) -> SolveOutcome {
        self.solving.store(true, Ordering::SeqCst);
        self.terminate_early_flag.store(false, Ordering::SeqCst);

        let instance = match self.config.weights {
            Some(weights) => Cow::Owned(instance.clone().with_weights(weights)),
            None => Cow::Borrowed(instance),
        };
        let mut model = DispatchModel::build(&instance);

        info!(
            event = "solve_start",
            orders = instance.num_orders(),
            vehicles = instance.num_vehicles(),
            stations = instance.num_stations(),
            slots = model.slots().len(),
            variables = model.network().num_vars(),
            propagators = model.network().num_propagators(),
            horizon = model.horizon(),
        );
        self.events.fire_search_started(&instance);

        let mut scope =
            SearchScope::new().with_terminate_early_flag(self.terminate_early_flag.clone());
        scope.start_search();
        let termination = OrTermination((
            self.config.time_limit().map(TimeTermination::new),
            self.config.node_count_limit().map(NodeCountTermination::new),
            self.config
                .solution_count_limit()
                .map(SolutionCountTermination::new),
            SolverTermination,
        ));
        let bnb = BranchAndBound::new(Brancher::new(
            model.decision_groups(),
            self.config.search.variable_selection,
        ));

        let mut best: Option<Schedule> = None;
        let status = bnb.search(&mut model, &mut scope, &termination, |m, s| {
            let schedule = Schedule::extract(&instance, m, s.node_count());
            debug!(
                event = "incumbent",
                cost = schedule.cost,
                node = s.node_count(),
                trips = schedule.total_trips(),
            );
            self.events.fire_incumbent(&schedule);
            best = Some(schedule);
        });

        let statistics = scope.take_stats();
        self.events.fire_search_finished(status, best.as_ref());
        info!(
            event = "solve_end",
            status = %status,
            cost = ?best.as_ref().map(|s| s.cost),
            nodes = statistics.nodes,
            failures = statistics.failures,
            solutions = statistics.solutions,
            duration_ms = statistics.elapsed.as_millis() as u64,
        );

        self.solving.store(false, Ordering::SeqCst);
        SolveOutcome {
            status,
            best,
            statistics,
        }
    }
}

#[cfg(test)]
#[path = "solver_tests.rs"]
mod tests;
