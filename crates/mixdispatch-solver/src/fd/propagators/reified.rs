//! Boolean reifications.

use crate::fd::{PropResult, Propagator, Store, VarId};

/// `b ⇔ x ≥ c`.
#[derive(Debug, Clone)]
pub struct ReifiedGe {
    b: VarId,
    x: VarId,
    c: i64,
}

impl ReifiedGe {
    pub fn new(b: VarId, x: VarId, c: i64) -> Self {
        Self { b, x, c }
    }
}

impl Propagator for ReifiedGe {
    fn name(&self) -> &'static str {
        "reified_ge"
    }

    fn variables(&self) -> Vec<VarId> {
        vec![self.b, self.x]
    }

    fn propagate(&self, store: &mut Store) -> PropResult {
        match store.value(self.b) {
            Some(1) => {
                store.set_min(self.x, self.c)?;
            }
            Some(_) => {
                store.set_max(self.x, self.c - 1)?;
            }
            None => {
                if store.min(self.x) >= self.c {
                    store.assign(self.b, 1)?;
                } else if store.max(self.x) < self.c {
                    store.assign(self.b, 0)?;
                }
            }
        }
        Ok(())
    }
}

/// `b ⇔ x = c`.
#[derive(Debug, Clone)]
pub struct ReifiedEq {
    b: VarId,
    x: VarId,
    c: i64,
}

impl ReifiedEq {
    pub fn new(b: VarId, x: VarId, c: i64) -> Self {
        Self { b, x, c }
    }
}

impl Propagator for ReifiedEq {
    fn name(&self) -> &'static str {
        "reified_eq"
    }

    fn variables(&self) -> Vec<VarId> {
        vec![self.b, self.x]
    }

    fn propagate(&self, store: &mut Store) -> PropResult {
        match store.value(self.b) {
            Some(1) => {
                store.assign(self.x, self.c)?;
            }
            Some(_) => {
                store.remove_value(self.x, self.c)?;
            }
            None => {
                if !store.contains(self.x, self.c) {
                    store.assign(self.b, 0)?;
                } else if store.is_fixed(self.x) {
                    store.assign(self.b, 1)?;
                }
            }
        }
        Ok(())
    }
}

/// `b ⇔ x ∧ y` over 0/1 variables.
#[derive(Debug, Clone)]
pub struct AndReif {
    b: VarId,
    x: VarId,
    y: VarId,
}

impl AndReif {
    pub fn new(b: VarId, x: VarId, y: VarId) -> Self {
        Self { b, x, y }
    }
}

impl Propagator for AndReif {
    fn name(&self) -> &'static str {
        "and_reif"
    }

    fn variables(&self) -> Vec<VarId> {
        vec![self.b, self.x, self.y]
    }

    fn propagate(&self, store: &mut Store) -> PropResult {
        let (x, y) = (store.value(self.x), store.value(self.y));
        if x == Some(0) || y == Some(0) {
            store.assign(self.b, 0)?;
            return Ok(());
        }
        if x == Some(1) && y == Some(1) {
            store.assign(self.b, 1)?;
            return Ok(());
        }
        match store.value(self.b) {
            Some(1) => {
                store.assign(self.x, 1)?;
                store.assign(self.y, 1)?;
            }
            Some(_) => {
                if x == Some(1) {
                    store.assign(self.y, 0)?;
                } else if y == Some(1) {
                    store.assign(self.x, 0)?;
                }
            }
            None => {}
        }
        Ok(())
    }
}
