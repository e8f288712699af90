//! Objective weights.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coefficients of the five cost terms.
///
/// # Examples
///
/// ```
/// use mixdispatch_core::CostWeights;
///
/// let w = CostWeights::default();
/// assert_eq!((w.lateness, w.waste, w.off_preferred, w.lag, w.travel), (10, 10, 1, 20, 20));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CostWeights {
    /// Per minute of first-delivery lateness.
    pub lateness: i64,
    /// Per volume unit poured beyond the requested total.
    pub waste: i64,
    /// Per delivery loaded away from the order's preferred station.
    pub off_preferred: i64,
    /// Per minute of gap between successive deliveries to one order.
    pub lag: i64,
    /// Per minute travelled to and from yards.
    pub travel: i64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            lateness: 10,
            waste: 10,
            off_preferred: 1,
            lag: 20,
            travel: 20,
        }
    }
}
