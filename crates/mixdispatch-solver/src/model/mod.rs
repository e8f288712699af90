//! The dispatch constraint model.
//!
//! [`DispatchModel::build`] turns a [`ProblemInstance`] into a
//! [`ConstraintNetwork`] over per-vehicle trip slots. Slot `(v, d)` lives at
//! flat index `v * slots_per_vehicle + d`; unused slots carry the reserved
//! order id [`DispatchModel::null_order`], station 0 and zero timestamps.

mod builder;

use mixdispatch_core::ProblemInstance;

use crate::fd::{ConstraintNetwork, Store, VarId};

pub use builder::COST_CAP;

/// Variables of one trip slot.
#[derive(Debug, Clone, Copy)]
pub struct SlotVars {
    pub vehicle: usize,
    pub index: usize,
    pub used: VarId,
    pub order: VarId,
    pub station: VarId,
    pub load: VarId,
    pub unload: VarId,
    pub arrival: VarId,
    pub travel_to: VarId,
    pub travel_from: VarId,
    pub volume: VarId,
    pub duration: VarId,
    pub poured: VarId,
    pub off_preferred: VarId,
}

/// Aggregates of one order, measured on its temporal delivery sequence.
#[derive(Debug, Clone)]
pub struct OrderVars {
    pub count: VarId,
    pub total_poured: VarId,
    pub waste: VarId,
    pub lateness: VarId,
    /// Global slot index realizing delivery `j`, or a private dummy value.
    pub sequence: Vec<VarId>,
    pub position_used: Vec<VarId>,
    /// Unload start of delivery `j`.
    pub unload: Vec<VarId>,
    /// Lag before delivery `j`; entry 0 is always 0.
    pub lag: Vec<VarId>,
}

/// Built model: network plus handles to every named variable.
#[derive(Debug)]
pub struct DispatchModel {
    network: ConstraintNetwork,
    deliveries: Vec<VarId>,
    slots: Vec<SlotVars>,
    orders: Vec<OrderVars>,
    cost: VarId,
    slots_per_vehicle: usize,
    null_order: i64,
    horizon: i64,
}

impl DispatchModel {
    pub fn build(instance: &ProblemInstance) -> Self {
        builder::ModelBuilder::new(instance).build()
    }

    pub fn network(&self) -> &ConstraintNetwork {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut ConstraintNetwork {
        &mut self.network
    }

    pub fn store(&self) -> &Store {
        self.network.store()
    }

    /// Number of used slots per vehicle.
    pub fn deliveries(&self) -> &[VarId] {
        &self.deliveries
    }

    pub fn slots(&self) -> &[SlotVars] {
        &self.slots
    }

    pub fn slot(&self, vehicle: usize, index: usize) -> &SlotVars {
        &self.slots[vehicle * self.slots_per_vehicle + index]
    }

    pub fn orders(&self) -> &[OrderVars] {
        &self.orders
    }

    pub fn cost(&self) -> VarId {
        self.cost
    }

    pub fn slots_per_vehicle(&self) -> usize {
        self.slots_per_vehicle
    }

    /// Order id carried by unused slots.
    pub fn null_order(&self) -> i64 {
        self.null_order
    }

    pub fn horizon(&self) -> i64 {
        self.horizon
    }

    /// Decision variables in branching priority order.
    pub fn decision_groups(&self) -> Vec<Vec<VarId>> {
        vec![
            self.deliveries.clone(),
            self.slots.iter().map(|s| s.order).collect(),
            self.slots.iter().map(|s| s.station).collect(),
            self.slots.iter().map(|s| s.load).collect(),
            self.slots.iter().map(|s| s.unload).collect(),
        ]
    }
}
