//! Termination conditions for the search.

mod composite;
mod external;
mod node_count;
mod solution_count;
mod time;

use std::fmt::Debug;

use crate::scope::SearchScope;

pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use node_count::NodeCountTermination;
pub use solution_count::SolutionCountTermination;
pub use time::TimeTermination;

/// Decides when to stop exploring.
///
/// Polled once per search node. A terminated search keeps its incumbent,
/// which is then reported without an optimality proof.
pub trait Termination: Send + Debug {
    /// Returns true if the search should stop.
    fn is_terminated(&self, scope: &SearchScope) -> bool;
}

/// An absent termination never fires.
impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        self.as_ref().is_some_and(|t| t.is_terminated(scope))
    }
}

/// Stops only when the owning solver's early-termination flag is raised.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolverTermination;

impl Termination for SolverTermination {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        scope.is_terminate_early()
    }
}
