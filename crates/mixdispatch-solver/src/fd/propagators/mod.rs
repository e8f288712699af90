//! Propagators used by the dispatch model.

mod alldiff;
mod conditional_sum;
mod disjunctive;
mod element;
mod horizon;
mod linear;
mod reified;

pub use alldiff::AllDifferent;
pub use conditional_sum::ConditionalSum;
pub use disjunctive::{Disjunctive, Task};
pub use element::{ElementConst, ElementVar};
pub use horizon::HorizonCap;
pub use linear::LinearLe;
pub use reified::{AndReif, ReifiedEq, ReifiedGe};

#[cfg(test)]
mod tests;
