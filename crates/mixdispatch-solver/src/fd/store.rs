//! Trail-based variable store.

use super::{Conflict, Domain, VarId};

/// Owns every variable domain and undoes changes on backtrack.
///
/// Each [`push_level`](Store::push_level) opens a new epoch. The first time
/// a variable is narrowed inside an epoch its previous domain is saved on
/// the trail, so [`pop_level`](Store::pop_level) restores the parent state
/// exactly in time proportional to the number of changed variables.
#[derive(Debug, Default)]
pub struct Store {
    domains: Vec<Domain>,
    stamps: Vec<u64>,
    trail: Vec<(VarId, Domain)>,
    levels: Vec<(usize, u64)>,
    epoch: u64,
    next_epoch: u64,
    modified: Vec<VarId>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable. Only valid before search starts.
    pub fn new_var(&mut self, domain: Domain) -> VarId {
        let id = VarId(self.domains.len() as u32);
        self.domains.push(domain);
        self.stamps.push(0);
        id
    }

    pub fn num_vars(&self) -> usize {
        self.domains.len()
    }

    pub fn domain(&self, var: VarId) -> &Domain {
        &self.domains[var.index()]
    }

    pub fn min(&self, var: VarId) -> i64 {
        self.domains[var.index()].min()
    }

    pub fn max(&self, var: VarId) -> i64 {
        self.domains[var.index()].max()
    }

    pub fn value(&self, var: VarId) -> Option<i64> {
        self.domains[var.index()].value()
    }

    pub fn is_fixed(&self, var: VarId) -> bool {
        self.domains[var.index()].is_fixed()
    }

    pub fn contains(&self, var: VarId, value: i64) -> bool {
        self.domains[var.index()].contains(value)
    }

    /// Current search depth.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn set_min(&mut self, var: VarId, min: i64) -> Result<bool, Conflict> {
        if min <= self.min(var) {
            return Ok(false);
        }
        self.narrow(var, |d| d.restrict_min(min))
    }

    pub fn set_max(&mut self, var: VarId, max: i64) -> Result<bool, Conflict> {
        if max >= self.max(var) {
            return Ok(false);
        }
        self.narrow(var, |d| d.restrict_max(max))
    }

    pub fn intersect_range(&mut self, var: VarId, lo: i64, hi: i64) -> Result<bool, Conflict> {
        self.narrow(var, |d| d.intersect_range(lo, hi))
    }

    pub fn assign(&mut self, var: VarId, value: i64) -> Result<bool, Conflict> {
        self.narrow(var, |d| d.intersect_range(value, value))
    }

    pub fn remove_value(&mut self, var: VarId, value: i64) -> Result<bool, Conflict> {
        if !self.contains(var, value) {
            return Ok(false);
        }
        self.narrow(var, |d| d.remove(value))
    }

    /// Keeps the values of `var` satisfying `keep`.
    pub fn retain(&mut self, var: VarId, keep: impl FnMut(i64) -> bool) -> Result<bool, Conflict> {
        self.narrow(var, |d| d.retain(keep))
    }

    pub fn remove_range(&mut self, var: VarId, lo: i64, hi: i64) -> Result<bool, Conflict> {
        self.narrow(var, |d| d.remove_range(lo, hi))
    }

    pub fn intersect(&mut self, var: VarId, other: &Domain) -> Result<bool, Conflict> {
        self.narrow(var, |d| d.intersect(other))
    }

    fn narrow(&mut self, var: VarId, op: impl FnOnce(&mut Domain) -> bool) -> Result<bool, Conflict> {
        let idx = var.index();
        let mut next = self.domains[idx].clone();
        if !op(&mut next) {
            return Ok(false);
        }
        if next.is_empty() {
            return Err(Conflict);
        }
        if !self.levels.is_empty() && self.stamps[idx] != self.epoch {
            self.stamps[idx] = self.epoch;
            let previous = std::mem::replace(&mut self.domains[idx], next);
            self.trail.push((var, previous));
        } else {
            self.domains[idx] = next;
        }
        self.modified.push(var);
        Ok(true)
    }

    /// Opens a choice point.
    pub fn push_level(&mut self) {
        self.levels.push((self.trail.len(), self.epoch));
        self.next_epoch += 1;
        self.epoch = self.next_epoch;
    }

    /// Restores the state saved by the matching [`push_level`](Store::push_level).
    pub fn pop_level(&mut self) {
        let Some((mark, parent_epoch)) = self.levels.pop() else {
            return;
        };
        while self.trail.len() > mark {
            if let Some((var, domain)) = self.trail.pop() {
                self.domains[var.index()] = domain;
            }
        }
        self.epoch = parent_epoch;
        self.modified.clear();
    }

    /// Drains the list of variables narrowed since the last call.
    pub fn take_modified(&mut self) -> Vec<VarId> {
        std::mem::take(&mut self.modified)
    }

    pub fn clear_modified(&mut self) {
        self.modified.clear();
    }
}
