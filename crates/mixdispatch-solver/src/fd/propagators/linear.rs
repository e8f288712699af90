//! Linear inequality with an optional guard literal.

use crate::fd::{Lit, PropResult, Propagator, Store, VarId};

/// `guard ⇒ Σ aᵢ·xᵢ ≤ rhs`.
///
/// Without a guard the inequality always holds. With a guard, a violated
/// lower bound falsifies the guard instead of failing.
#[derive(Debug, Clone)]
pub struct LinearLe {
    terms: Vec<(i64, VarId)>,
    rhs: i64,
    guard: Option<Lit>,
}

impl LinearLe {
    pub fn new(terms: Vec<(i64, VarId)>, rhs: i64) -> Self {
        Self {
            terms: terms.into_iter().filter(|&(a, _)| a != 0).collect(),
            rhs,
            guard: None,
        }
    }

    pub fn guarded(mut self, guard: Lit) -> Self {
        self.guard = Some(guard);
        self
    }

    /// The two inequalities encoding `guard ⇒ Σ aᵢ·xᵢ = rhs`.
    pub fn equality(terms: Vec<(i64, VarId)>, rhs: i64, guard: Option<Lit>) -> [LinearLe; 2] {
        let negated = terms.iter().map(|&(a, x)| (-a, x)).collect();
        let mut le = LinearLe::new(terms, rhs);
        let mut ge = LinearLe::new(negated, -rhs);
        le.guard = guard;
        ge.guard = guard;
        [le, ge]
    }

    fn min_sum(&self, store: &Store) -> i64 {
        self.terms
            .iter()
            .map(|&(a, x)| term_min(store, a, x))
            .fold(0i64, i64::saturating_add)
    }
}

fn term_min(store: &Store, a: i64, x: VarId) -> i64 {
    if a > 0 {
        a.saturating_mul(store.min(x))
    } else {
        a.saturating_mul(store.max(x))
    }
}

impl Propagator for LinearLe {
    fn name(&self) -> &'static str {
        "linear_le"
    }

    fn variables(&self) -> Vec<VarId> {
        let mut vars: Vec<VarId> = self.terms.iter().map(|&(_, x)| x).collect();
        vars.extend(self.guard.map(|g| g.var));
        vars
    }

    fn propagate(&self, store: &mut Store) -> PropResult {
        let min_sum = self.min_sum(store);

        if let Some(guard) = self.guard {
            match guard.status(store) {
                Some(false) => return Ok(()),
                Some(true) => {}
                None => {
                    if min_sum > self.rhs {
                        guard.falsify(store)?;
                    }
                    return Ok(());
                }
            }
        }

        if min_sum > self.rhs {
            return Err(crate::fd::Conflict);
        }
        for &(a, x) in &self.terms {
            let slack = self.rhs - (min_sum - term_min(store, a, x));
            if a > 0 {
                store.set_max(x, slack.div_euclid(a))?;
            } else {
                store.set_min(x, -slack.div_euclid(-a))?;
            }
        }
        Ok(())
    }
}
