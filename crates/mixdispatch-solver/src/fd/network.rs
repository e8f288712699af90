//! Propagator registration and the fixpoint loop.

use std::collections::VecDeque;
use std::fmt::Debug;

use super::{Conflict, Domain, PropResult, Store, VarId};

/// A constraint expressed as a narrowing function.
///
/// `propagate` reads the current domains and narrows them, or reports a
/// [`Conflict`]. It must be monotone: it never widens a domain, and when
/// every watched variable is fixed it either accepts or fails.
pub trait Propagator: Send + Sync + Debug {
    /// Short name for diagnostics.
    fn name(&self) -> &'static str;

    /// Variables whose changes should wake this propagator.
    fn variables(&self) -> Vec<VarId>;

    fn propagate(&self, store: &mut Store) -> PropResult;
}

/// Store plus the propagators posted over it.
#[derive(Debug, Default)]
pub struct ConstraintNetwork {
    store: Store,
    propagators: Vec<Box<dyn Propagator>>,
    watchers: Vec<Vec<usize>>,
    queue: VecDeque<usize>,
    queued: Vec<bool>,
    failed: bool,
    propagation_count: u64,
}

impl ConstraintNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_var(&mut self, domain: Domain) -> VarId {
        if domain.is_empty() {
            self.failed = true;
        }
        self.watchers.push(Vec::new());
        self.store.new_var(domain)
    }

    pub fn new_bool(&mut self) -> VarId {
        self.new_var(Domain::boolean())
    }

    /// Registers a propagator and schedules it for the next fixpoint.
    pub fn post(&mut self, propagator: impl Propagator + 'static) {
        self.post_boxed(Box::new(propagator));
    }

    pub fn post_boxed(&mut self, propagator: Box<dyn Propagator>) {
        let id = self.propagators.len();
        let mut vars = propagator.variables();
        vars.sort_unstable();
        vars.dedup();
        for var in vars {
            self.watchers[var.index()].push(id);
        }
        self.propagators.push(propagator);
        self.queued.push(true);
        self.queue.push_back(id);
    }

    /// Marks the network as unsatisfiable.
    pub fn fail(&mut self) {
        self.failed = true;
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Direct store access for decisions. Changes are picked up by the next
    /// call to [`propagate`](ConstraintNetwork::propagate).
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn num_vars(&self) -> usize {
        self.store.num_vars()
    }

    pub fn num_propagators(&self) -> usize {
        self.propagators.len()
    }

    /// Total propagator executions so far.
    pub fn propagation_count(&self) -> u64 {
        self.propagation_count
    }

    /// Runs propagators until no domain changes or one becomes empty.
    pub fn propagate(&mut self) -> PropResult {
        if self.failed {
            return Err(Conflict);
        }
        loop {
            self.schedule_modified();
            let Some(id) = self.queue.pop_front() else {
                return Ok(());
            };
            self.queued[id] = false;
            self.propagation_count += 1;
            if let Err(conflict) = self.propagators[id].propagate(&mut self.store) {
                self.reset_queue();
                return Err(conflict);
            }
        }
    }

    fn schedule_modified(&mut self) {
        for var in self.store.take_modified() {
            for &id in &self.watchers[var.index()] {
                if !self.queued[id] {
                    self.queued[id] = true;
                    self.queue.push_back(id);
                }
            }
        }
    }

    fn reset_queue(&mut self) {
        for id in self.queue.drain(..) {
            self.queued[id] = false;
        }
        self.store.clear_modified();
    }

    pub fn push_level(&mut self) {
        self.store.push_level();
    }

    pub fn pop_level(&mut self) {
        self.store.pop_level();
        self.reset_queue();
    }
}
