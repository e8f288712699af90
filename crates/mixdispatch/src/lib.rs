//! MixDispatch - Ready-mix concrete delivery scheduling in Rust
//!
//! Describe orders, vehicles and stations, then call [`solve`].
//!
//! # Example
//!
//! ```rust
//! use mixdispatch::prelude::*;
//!
//! let site = Order::new("site-a", 4, 1, 10, 30, 1).with_travel(0, 10, 10);
//! let instance = ProblemInstance::new(
//!     vec![site],
//!     vec![Vehicle::new("truck-1", 4, 20, 2)],
//!     vec![Station::new("depot", 5)],
//! )
//! .unwrap();
//!
//! let outcome = mixdispatch::solve(&instance);
//! assert!(outcome.is_optimal());
//! assert_eq!(outcome.best.unwrap().total_trips(), 1);
//! ```

use std::path::Path;
use std::sync::Arc;
use std::thread::JoinHandle;

use thiserror::Error;
use tokio::sync::mpsc::UnboundedReceiver;

// Problem instance types
pub use mixdispatch_core::{
    Bounds, CostWeights, Order, ProblemError, ProblemInstance, Station, Vehicle, UNREACHABLE,
};

// Configuration
pub use mixdispatch_config::{ConfigError, SolverConfig, TerminationConfig, VariableSelection};

// Solver, results and listeners
pub use mixdispatch_solver::{
    ChannelListener, CostBreakdown, CountingListener, LoggingListener, OrderSummary, Schedule,
    SearchStats, SearchStatus, SolutionListener, SolveEvent, SolveOutcome, Solver, Trip,
    VehicleRoute,
};

#[cfg(feature = "console")]
pub use mixdispatch_console as console;

/// Configuration file read by [`solve`] from the working directory.
pub const CONFIG_FILE: &str = "solver.toml";

/// Errors surfaced by the facade entry points.
#[derive(Debug, Error)]
pub enum MixDispatchError {
    #[error(transparent)]
    Problem(#[from] ProblemError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("solver thread panicked")]
    SolverPanicked,
}

/// Solves an instance with the configuration in [`CONFIG_FILE`].
///
/// Falls back to the default configuration when the file is missing or
/// unreadable.
pub fn solve(instance: &ProblemInstance) -> SolveOutcome {
    let config = SolverConfig::load(CONFIG_FILE).unwrap_or_default();
    solver(config).solve(instance)
}

/// Solves an instance with the configuration at `path`.
pub fn solve_with_config(
    instance: &ProblemInstance,
    path: impl AsRef<Path>,
) -> Result<SolveOutcome, MixDispatchError> {
    let config = SolverConfig::load(path)?;
    Ok(solver(config).solve(instance))
}

/// Validates raw records into an instance and solves it.
pub fn solve_records(
    orders: Vec<Order>,
    vehicles: Vec<Vehicle>,
    stations: Vec<Station>,
    config: SolverConfig,
) -> Result<SolveOutcome, MixDispatchError> {
    let instance = ProblemInstance::new(orders, vehicles, stations)?;
    config.validate()?;
    Ok(solver(config).solve(&instance))
}

/// Starts a solve on a background thread.
///
/// Incumbents and the final status are streamed through
/// [`SolveHandle::events`].
pub fn solve_in_background(instance: ProblemInstance, config: SolverConfig) -> SolveHandle {
    let (listener, events) = ChannelListener::channel();
    let solver = Arc::new(solver(config).with_listener(Arc::new(listener)));
    let worker = Arc::clone(&solver);
    let thread = std::thread::spawn(move || worker.solve(&instance));
    SolveHandle {
        solver,
        thread,
        events,
    }
}

fn solver(config: SolverConfig) -> Solver {
    #[cfg(feature = "console")]
    mixdispatch_console::init();

    Solver::new(config)
}

/// A solve running on its own thread.
#[derive(Debug)]
pub struct SolveHandle {
    solver: Arc<Solver>,
    thread: JoinHandle<SolveOutcome>,
    events: UnboundedReceiver<SolveEvent>,
}

impl SolveHandle {
    /// Requests early termination; false when the solve is not running.
    pub fn terminate_early(&self) -> bool {
        self.solver.terminate_early()
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    pub fn events(&mut self) -> &mut UnboundedReceiver<SolveEvent> {
        &mut self.events
    }

    /// Waits for the solve and returns its outcome.
    pub fn join(self) -> Result<SolveOutcome, MixDispatchError> {
        self.thread.join().map_err(|_| MixDispatchError::SolverPanicked)
    }
}

pub mod prelude {
    pub use super::{
        CostWeights, Order, ProblemInstance, Schedule, SearchStatus, SolveOutcome, Solver,
        SolverConfig, Station, Vehicle,
    };
}
