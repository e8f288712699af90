//! Terminates after a number of improving solutions.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates once `limit` incumbents have been found.
///
/// A limit of 1 turns the branch-and-bound into a first-solution search.
#[derive(Debug, Clone)]
pub struct SolutionCountTermination {
    limit: u64,
}

impl SolutionCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for SolutionCountTermination {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        scope.solution_count() >= self.limit
    }
}
