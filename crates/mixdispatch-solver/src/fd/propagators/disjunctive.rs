//! Unary resource with optional tasks.

use crate::fd::{Conflict, PropResult, Propagator, Store, VarId};

/// One operation competing for a unary resource.
#[derive(Debug, Clone, Copy)]
pub struct Task {
    pub start: VarId,
    /// Only the lower bound is used as the processing time.
    pub duration: VarId,
    /// 0/1 flag: the task runs on this resource.
    pub presence: VarId,
}

/// No two present tasks overlap in time.
///
/// Filtering combines an overload check and task-interval edge finding on
/// the mandatory tasks with detectable pairwise precedences. Optional
/// tasks that cannot fit around a mandatory one are made absent. Tasks
/// with zero duration never conflict and are ignored.
#[derive(Debug, Clone)]
pub struct Disjunctive {
    tasks: Vec<Task>,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    task: usize,
    est: i64,
    lst: i64,
    dur: i64,
}

impl Window {
    fn lct(&self) -> i64 {
        self.lst + self.dur
    }

    fn ect(&self) -> i64 {
        self.est + self.dur
    }
}

impl Disjunctive {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    fn windows(&self, store: &Store) -> (Vec<Window>, Vec<Window>) {
        let mut mandatory = Vec::new();
        let mut optional = Vec::new();
        for (task, t) in self.tasks.iter().enumerate() {
            let dur = store.min(t.duration);
            if dur <= 0 || store.max(t.presence) == 0 {
                continue;
            }
            let w = Window {
                task,
                est: store.min(t.start),
                lst: store.max(t.start),
                dur,
            };
            if store.min(t.presence) == 1 {
                mandatory.push(w);
            } else {
                optional.push(w);
            }
        }
        (mandatory, optional)
    }

    fn detectable_precedences(&self, store: &mut Store, mandatory: &[Window]) -> PropResult {
        for (n, a) in mandatory.iter().enumerate() {
            for b in &mandatory[n + 1..] {
                let a_first = a.ect() <= b.lst;
                let b_first = b.ect() <= a.lst;
                match (a_first, b_first) {
                    (false, false) => return Err(Conflict),
                    (true, false) => self.order(store, a, b)?,
                    (false, true) => self.order(store, b, a)?,
                    (true, true) => {}
                }
            }
        }
        Ok(())
    }

    fn order(&self, store: &mut Store, first: &Window, second: &Window) -> PropResult {
        store.set_min(self.tasks[second.task].start, first.ect())?;
        store.set_max(self.tasks[first.task].start, second.lst - first.dur)?;
        Ok(())
    }

    fn edge_finding(&self, store: &mut Store, mandatory: &[Window]) -> PropResult {
        for lo in mandatory.iter().map(|w| w.est) {
            for hi in mandatory.iter().map(Window::lct) {
                if lo >= hi {
                    continue;
                }
                let inside: Vec<&Window> = mandatory
                    .iter()
                    .filter(|w| w.est >= lo && w.lct() <= hi)
                    .collect();
                if inside.is_empty() {
                    continue;
                }
                let load: i64 = inside.iter().map(|w| w.dur).sum();
                if load > hi - lo {
                    return Err(Conflict);
                }
                for w in mandatory {
                    if w.est >= lo && w.lct() <= hi {
                        continue;
                    }
                    let start = self.tasks[w.task].start;
                    // w cannot precede or interleave the set: it follows it
                    if w.est.min(lo) + load + w.dur > hi {
                        store.set_min(start, lo + load)?;
                    }
                    // w cannot follow the set: it precedes it
                    if lo + load + w.dur > w.lct().max(hi) {
                        store.set_max(start, hi - load - w.dur)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn exclude_optional(
        &self,
        store: &mut Store,
        mandatory: &[Window],
        optional: &[Window],
    ) -> PropResult {
        for o in optional {
            let blocked = mandatory
                .iter()
                .any(|m| o.ect() > m.lst && m.ect() > o.lst);
            if blocked {
                store.assign(self.tasks[o.task].presence, 0)?;
            }
        }
        Ok(())
    }
}

impl Propagator for Disjunctive {
    fn name(&self) -> &'static str {
        "disjunctive"
    }

    fn variables(&self) -> Vec<VarId> {
        self.tasks
            .iter()
            .flat_map(|t| [t.start, t.duration, t.presence])
            .collect()
    }

    fn propagate(&self, store: &mut Store) -> PropResult {
        let (mandatory, _) = self.windows(store);
        self.detectable_precedences(store, &mandatory)?;

        let (mandatory, _) = self.windows(store);
        self.edge_finding(store, &mandatory)?;

        let (mandatory, optional) = self.windows(store);
        self.exclude_optional(store, &mandatory, &optional)
    }
}
