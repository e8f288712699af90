//! Table lookups with a variable index.

use crate::fd::{Domain, PropResult, Propagator, Store, VarId};

/// `result = table[index]` over a constant table.
///
/// Index values whose entry lies outside the result domain are removed;
/// the result is narrowed to the hull of the entries still reachable.
#[derive(Debug, Clone)]
pub struct ElementConst {
    index: VarId,
    table: Vec<i64>,
    result: VarId,
}

impl ElementConst {
    pub fn new(index: VarId, table: Vec<i64>, result: VarId) -> Self {
        Self {
            index,
            table,
            result,
        }
    }
}

impl Propagator for ElementConst {
    fn name(&self) -> &'static str {
        "element_const"
    }

    fn variables(&self) -> Vec<VarId> {
        vec![self.index, self.result]
    }

    fn propagate(&self, store: &mut Store) -> PropResult {
        store.intersect_range(self.index, 0, self.table.len() as i64 - 1)?;

        let mut lo = i64::MAX;
        let mut hi = i64::MIN;
        let mut supported = Vec::new();
        for i in store.domain(self.index).values() {
            let entry = self.table[i as usize];
            if store.contains(self.result, entry) {
                lo = lo.min(entry);
                hi = hi.max(entry);
                supported.push(i);
            }
        }
        store.intersect(self.index, &Domain::from_values(supported))?;
        store.intersect_range(self.result, lo, hi)?;
        Ok(())
    }
}

/// `result = array[index]` over an array of variables.
#[derive(Debug, Clone)]
pub struct ElementVar {
    index: VarId,
    array: Vec<VarId>,
    result: VarId,
}

impl ElementVar {
    pub fn new(index: VarId, array: Vec<VarId>, result: VarId) -> Self {
        Self {
            index,
            array,
            result,
        }
    }
}

impl Propagator for ElementVar {
    fn name(&self) -> &'static str {
        "element_var"
    }

    fn variables(&self) -> Vec<VarId> {
        let mut vars = self.array.clone();
        vars.push(self.index);
        vars.push(self.result);
        vars
    }

    fn propagate(&self, store: &mut Store) -> PropResult {
        store.intersect_range(self.index, 0, self.array.len() as i64 - 1)?;

        let fixed_result = store.value(self.result);
        let (r_lo, r_hi) = (store.min(self.result), store.max(self.result));
        let mut lo = i64::MAX;
        let mut hi = i64::MIN;
        let mut unsupported = Vec::new();
        for i in store.domain(self.index).values() {
            let x = self.array[i as usize];
            let supported = match fixed_result {
                Some(r) => store.contains(x, r),
                None => store.min(x) <= r_hi && store.max(x) >= r_lo,
            };
            if supported {
                lo = lo.min(store.min(x));
                hi = hi.max(store.max(x));
            } else {
                unsupported.push(i);
            }
        }
        if !unsupported.is_empty() {
            store.retain(self.index, |i| !unsupported.contains(&i))?;
        }
        store.intersect_range(self.result, lo, hi)?;

        if let Some(i) = store.value(self.index) {
            let x = self.array[i as usize];
            match store.value(self.result) {
                Some(r) => {
                    store.assign(x, r)?;
                }
                None => {
                    let (lo, hi) = (store.min(self.result), store.max(self.result));
                    store.intersect_range(x, lo, hi)?;
                }
            }
        }
        Ok(())
    }
}
