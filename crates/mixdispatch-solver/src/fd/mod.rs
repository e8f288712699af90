//! Finite-domain constraint engine.
//!
//! A small propagation kernel sized for the dispatch model:
//! - [`Domain`]: interval-list integer sets
//! - [`Store`]: domains plus a trail for exact backtracking
//! - [`Propagator`]: a pure narrowing function over the store
//! - [`ConstraintNetwork`]: watcher lists and the fixpoint loop
//!
//! # Example
//!
//! ```
//! use mixdispatch_solver::fd::{ConstraintNetwork, Domain};
//! use mixdispatch_solver::fd::propagators::LinearLe;
//!
//! let mut net = ConstraintNetwork::new();
//! let x = net.new_var(Domain::range(0, 10));
//! let y = net.new_var(Domain::range(4, 10));
//! // x + y <= 8
//! net.post(LinearLe::new(vec![(1, x), (1, y)], 8));
//!
//! assert!(net.propagate().is_ok());
//! assert_eq!(net.store().max(x), 4);
//! ```

mod domain;
mod network;
pub mod propagators;
mod store;

use std::fmt;

pub use domain::{Domain, Interval};
pub use network::{ConstraintNetwork, Propagator};
pub use store::Store;

/// Handle to a variable in a [`Store`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub(crate) u32);

impl VarId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A domain became empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict;

/// Outcome of running a propagator.
pub type PropResult = Result<(), Conflict>;

/// Literal `var == value` over a 0/1 variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lit {
    pub var: VarId,
    pub value: bool,
}

impl Lit {
    pub fn pos(var: VarId) -> Self {
        Self { var, value: true }
    }

    pub fn neg(var: VarId) -> Self {
        Self { var, value: false }
    }

    /// `Some(true)` if the literal holds, `Some(false)` if it is violated.
    pub fn status(&self, store: &Store) -> Option<bool> {
        store.value(self.var).map(|v| (v == 1) == self.value)
    }

    /// Forces the literal to be false.
    pub fn falsify(&self, store: &mut Store) -> Result<bool, Conflict> {
        store.assign(self.var, if self.value { 0 } else { 1 })
    }
}

#[cfg(test)]
mod tests;
