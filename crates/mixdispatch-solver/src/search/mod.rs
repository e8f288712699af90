//! Depth-first branch-and-bound.
//!
//! Every node propagates to a fixpoint after posting `cost ≤ best − 1`.
//! Branching is binary: the left child assigns the selected variable its
//! minimum value, the right child removes that value. Choice points live on
//! an explicit stack and each one owns a trail level of the store, so
//! backtracking restores the parent's domains exactly.

mod brancher;

use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::fd::{ConstraintNetwork, PropResult, VarId};
use crate::model::DispatchModel;
use crate::scope::SearchScope;
use crate::termination::Termination;

pub use brancher::Brancher;

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// Tree exhausted; the last incumbent is optimal.
    Optimal,
    /// Tree exhausted without any solution.
    Infeasible,
    /// Stopped by a termination; the incumbent, if any, is unproven.
    Truncated,
}

impl SearchStatus {
    /// Whether the outcome is backed by an exhausted search tree.
    pub fn is_proven(self) -> bool {
        !matches!(self, SearchStatus::Truncated)
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SearchStatus::Optimal => "optimal",
            SearchStatus::Infeasible => "infeasible",
            SearchStatus::Truncated => "truncated",
        };
        f.write_str(s)
    }
}

/// A network with a variable to minimize.
pub trait SearchSpace {
    fn network(&self) -> &ConstraintNetwork;

    fn network_mut(&mut self) -> &mut ConstraintNetwork;

    fn objective(&self) -> VarId;
}

impl SearchSpace for DispatchModel {
    fn network(&self) -> &ConstraintNetwork {
        DispatchModel::network(self)
    }

    fn network_mut(&mut self) -> &mut ConstraintNetwork {
        DispatchModel::network_mut(self)
    }

    fn objective(&self) -> VarId {
        self.cost()
    }
}

#[derive(Debug, Clone, Copy)]
struct Choice {
    var: VarId,
    value: i64,
}

/// Branch-and-bound driver.
#[derive(Debug, Clone)]
pub struct BranchAndBound {
    brancher: Brancher,
}

impl BranchAndBound {
    pub fn new(brancher: Brancher) -> Self {
        Self { brancher }
    }

    /// Explores `space` until the tree is exhausted or `termination` fires.
    ///
    /// `on_incumbent` runs at every improving leaf while all variables are
    /// fixed; the incumbent's cost is already recorded in `scope`. On return
    /// the network is back at its root state.
    pub fn search<M, T, F>(
        &self,
        space: &mut M,
        scope: &mut SearchScope,
        termination: &T,
        mut on_incumbent: F,
    ) -> SearchStatus
    where
        M: SearchSpace,
        T: Termination + ?Sized,
        F: FnMut(&M, &SearchScope),
    {
        let objective = space.objective();
        let mut stack: Vec<Choice> = Vec::new();

        let status = loop {
            if termination.is_terminated(scope) {
                break SearchStatus::Truncated;
            }
            scope.stats_mut().record_node(stack.len());

            if Self::expand(space, scope, objective).is_ok() {
                match self.brancher.select(space.network().store()) {
                    Some(var) => {
                        let value = space.network().store().min(var);
                        trace!(event = "node", depth = stack.len(), var = var.index(), value);
                        let network = space.network_mut();
                        network.push_level();
                        if network.store_mut().assign(var, value).is_ok() {
                            stack.push(Choice { var, value });
                            continue;
                        }
                        network.pop_level();
                    }
                    None => {
                        let cost = space.network().store().min(objective);
                        scope.set_best_cost(cost);
                        on_incumbent(space, scope);
                    }
                }
            } else {
                scope.stats_mut().record_failure();
            }

            if !Self::backtrack(space, &mut stack) {
                break match scope.best_cost() {
                    Some(_) => SearchStatus::Optimal,
                    None => SearchStatus::Infeasible,
                };
            }
        };

        while stack.pop().is_some() {
            space.network_mut().pop_level();
        }
        let propagations = space.network().propagation_count();
        scope.stats_mut().set_propagations(propagations);
        status
    }

    fn expand<M: SearchSpace>(space: &mut M, scope: &SearchScope, objective: VarId) -> PropResult {
        let network = space.network_mut();
        if let Some(best) = scope.best_cost() {
            network.store_mut().set_max(objective, best - 1)?;
        }
        network.propagate()
    }

    /// Moves to the right child of the deepest open choice point.
    fn backtrack<M: SearchSpace>(space: &mut M, stack: &mut Vec<Choice>) -> bool {
        while let Some(choice) = stack.pop() {
            let network = space.network_mut();
            network.pop_level();
            if network.store_mut().remove_value(choice.var, choice.value).is_ok() {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests;
