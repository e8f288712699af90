//! Node count termination.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates once the search has visited a number of nodes.
///
/// # Example
///
/// ```
/// use mixdispatch_solver::termination::NodeCountTermination;
///
/// let term = NodeCountTermination::new(10_000);
/// ```
#[derive(Debug, Clone)]
pub struct NodeCountTermination {
    limit: u64,
}

impl NodeCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for NodeCountTermination {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        scope.node_count() >= self.limit
    }
}
