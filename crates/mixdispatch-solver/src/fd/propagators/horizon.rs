//! Volume poured before the planning horizon closes.

use crate::fd::{Conflict, PropResult, Propagator, Store, VarId};

/// `poured = min(volume, rate · max(0, horizon − unload))`.
#[derive(Debug, Clone)]
pub struct HorizonCap {
    poured: VarId,
    volume: VarId,
    rate: VarId,
    unload: VarId,
    horizon: i64,
}

impl HorizonCap {
    pub fn new(poured: VarId, volume: VarId, rate: VarId, unload: VarId, horizon: i64) -> Self {
        Self {
            poured,
            volume,
            rate,
            unload,
            horizon,
        }
    }
}

impl Propagator for HorizonCap {
    fn name(&self) -> &'static str {
        "horizon_cap"
    }

    fn variables(&self) -> Vec<VarId> {
        vec![self.poured, self.volume, self.rate, self.unload]
    }

    fn propagate(&self, store: &mut Store) -> PropResult {
        let remaining_hi = (self.horizon - store.min(self.unload)).max(0);
        let remaining_lo = (self.horizon - store.max(self.unload)).max(0);
        let cap_hi = store.max(self.rate).max(0).saturating_mul(remaining_hi);
        let cap_lo = store.min(self.rate).max(0).saturating_mul(remaining_lo);

        store.intersect_range(
            self.poured,
            store.min(self.volume).min(cap_lo),
            store.max(self.volume).min(cap_hi),
        )?;

        let need = store.min(self.poured);
        store.set_min(self.volume, need)?;
        if need > 0 {
            let rate = store.max(self.rate);
            if rate <= 0 {
                return Err(Conflict);
            }
            // rate · (horizon − unload) ≥ need
            let minutes = (need + rate - 1) / rate;
            store.set_max(self.unload, self.horizon - minutes)?;
        }
        Ok(())
    }
}
