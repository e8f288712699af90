//! Pairwise distinct values.

use crate::fd::{Conflict, PropResult, Propagator, Store, VarId};

/// All variables take distinct values.
///
/// Fixed values are eliminated from the other domains, then bounds are
/// checked for Hall intervals: `k` variables whose ranges all fit inside a
/// window of `k` values consume that window.
#[derive(Debug, Clone)]
pub struct AllDifferent {
    vars: Vec<VarId>,
}

impl AllDifferent {
    pub fn new(vars: Vec<VarId>) -> Self {
        Self { vars }
    }

    fn eliminate_fixed(&self, store: &mut Store) -> PropResult {
        let mut changed = true;
        while changed {
            changed = false;
            for (i, &x) in self.vars.iter().enumerate() {
                let Some(v) = store.value(x) else {
                    continue;
                };
                for (j, &y) in self.vars.iter().enumerate() {
                    if i != j && store.remove_value(y, v)? {
                        changed = true;
                    }
                }
            }
        }
        Ok(())
    }

    fn hall_intervals(&self, store: &mut Store) -> PropResult {
        let bounds: Vec<(i64, i64)> = self
            .vars
            .iter()
            .map(|&x| (store.min(x), store.max(x)))
            .collect();

        for &(lo, _) in &bounds {
            for &(_, hi) in &bounds {
                if lo > hi {
                    continue;
                }
                let inside = bounds
                    .iter()
                    .filter(|&&(l, h)| l >= lo && h <= hi)
                    .count() as i64;
                let width = hi - lo + 1;
                if inside > width {
                    return Err(Conflict);
                }
                if inside == width {
                    for (k, &x) in self.vars.iter().enumerate() {
                        let (l, h) = bounds[k];
                        if !(l >= lo && h <= hi) {
                            store.remove_range(x, lo, hi)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl Propagator for AllDifferent {
    fn name(&self) -> &'static str {
        "all_different"
    }

    fn variables(&self) -> Vec<VarId> {
        self.vars.clone()
    }

    fn propagate(&self, store: &mut Store) -> PropResult {
        self.eliminate_fixed(store)?;
        self.hall_intervals(store)
    }
}
