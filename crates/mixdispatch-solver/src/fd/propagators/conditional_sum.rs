//! Sum of weights over the items selecting one value.

use crate::fd::{PropResult, Propagator, Store, VarId};

/// `total = Σ weightsᵢ` over every `i` with `selectorsᵢ = value`.
///
/// Used for per-order delivery counts (unit weights) and poured volume.
#[derive(Debug, Clone)]
pub struct ConditionalSum {
    selectors: Vec<VarId>,
    weights: Vec<VarId>,
    value: i64,
    total: VarId,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Membership {
    In,
    Out,
    Maybe,
}

impl ConditionalSum {
    pub fn new(selectors: Vec<VarId>, weights: Vec<VarId>, value: i64, total: VarId) -> Self {
        debug_assert_eq!(selectors.len(), weights.len());
        Self {
            selectors,
            weights,
            value,
            total,
        }
    }

    fn membership(&self, store: &Store, i: usize) -> Membership {
        let sel = self.selectors[i];
        if !store.contains(sel, self.value) {
            Membership::Out
        } else if store.is_fixed(sel) {
            Membership::In
        } else {
            Membership::Maybe
        }
    }
}

impl Propagator for ConditionalSum {
    fn name(&self) -> &'static str {
        "conditional_sum"
    }

    fn variables(&self) -> Vec<VarId> {
        let mut vars = self.selectors.clone();
        vars.extend(self.weights.iter().copied());
        vars.push(self.total);
        vars
    }

    fn propagate(&self, store: &mut Store) -> PropResult {
        let membership: Vec<Membership> = (0..self.selectors.len())
            .map(|i| self.membership(store, i))
            .collect();

        let (mut lo, mut hi) = (0i64, 0i64);
        for (i, m) in membership.iter().enumerate() {
            let w = self.weights[i];
            match m {
                Membership::In => {
                    lo += store.min(w);
                    hi += store.max(w);
                }
                Membership::Maybe => {
                    lo += store.min(w).min(0);
                    hi += store.max(w).max(0);
                }
                Membership::Out => {}
            }
        }
        store.intersect_range(self.total, lo, hi)?;
        let (t_lo, t_hi) = (store.min(self.total), store.max(self.total));

        for (i, m) in membership.iter().enumerate() {
            let (sel, w) = (self.selectors[i], self.weights[i]);
            let (w_lo, w_hi) = (store.min(w), store.max(w));
            match m {
                Membership::In => {
                    store.set_min(w, t_lo - (hi - w_hi))?;
                    store.set_max(w, t_hi - (lo - w_lo))?;
                }
                Membership::Maybe => {
                    let lo_without = lo - w_lo.min(0);
                    let hi_without = hi - w_hi.max(0);
                    if lo_without + w_lo > t_hi || hi_without + w_hi < t_lo {
                        store.remove_value(sel, self.value)?;
                    } else if hi_without < t_lo || lo_without > t_hi {
                        store.assign(sel, self.value)?;
                    }
                }
                Membership::Out => {}
            }
        }
        Ok(())
    }
}
