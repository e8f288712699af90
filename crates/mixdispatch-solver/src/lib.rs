//! Branch-and-bound dispatch solver.
//!
//! The crate is organized bottom-up:
//! - [`fd`]: finite-domain variables, propagators and the fixpoint loop
//! - [`model`]: the dispatch model posted over a [`ProblemInstance`]
//! - [`search`]: depth-first branch-and-bound with regret branching
//! - [`termination`]: composable stop conditions
//! - [`report`]: immutable [`Schedule`] snapshots of incumbents
//! - [`event`]: listeners notified of incumbents and the final status
//! - [`solver`]: the [`Solver`] tying it all together
//!
//! [`ProblemInstance`]: mixdispatch_core::ProblemInstance

pub mod event;
pub mod fd;
pub mod model;
pub mod report;
pub mod scope;
pub mod search;
pub mod solver;
pub mod stats;
pub mod termination;

pub use event::{
    ChannelListener, CountingListener, LoggingListener, SolutionListener, SolveEvent,
    SolveEventSupport,
};
pub use model::DispatchModel;
pub use report::{CostBreakdown, OrderSummary, Schedule, Trip, VehicleRoute};
pub use scope::SearchScope;
pub use search::{BranchAndBound, Brancher, SearchSpace, SearchStatus};
pub use solver::{SolveOutcome, Solver};
pub use stats::SearchStats;
pub use termination::{
    ExternalTermination, NodeCountTermination, OrTermination, SolutionCountTermination,
    Termination, TimeTermination,
};
