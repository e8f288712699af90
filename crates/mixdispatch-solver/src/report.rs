//! Solution snapshots.
//!
//! A [`Schedule`] is extracted from a fully bound model and never refers
//! back to it. Times are absolute, i.e. shifted back by the instance's time
//! origin.

use std::fmt;

use serde::Serialize;

use mixdispatch_core::{CostWeights, ProblemInstance};

use crate::fd::{Store, VarId};
use crate::model::DispatchModel;

/// One used slot of a vehicle route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trip {
    pub slot: usize,
    pub order: usize,
    pub order_name: String,
    pub station: usize,
    pub load_time: i64,
    pub arrival_time: i64,
    pub unload_time: i64,
    pub unload_duration: i64,
    pub travel_to: i64,
    pub travel_from: i64,
    /// Vehicle volume carried for the order.
    pub delivered_volume: i64,
    /// Volume actually poured before the horizon.
    pub poured_volume: i64,
    pub off_preferred: bool,
}

impl Trip {
    pub fn unload_end(&self) -> i64 {
        self.unload_time + self.unload_duration
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleRoute {
    pub vehicle: usize,
    pub name: String,
    pub trips: Vec<Trip>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub order: usize,
    pub name: String,
    pub requested: i64,
    pub delivered: i64,
    pub poured: i64,
    pub deliveries: usize,
    pub lateness: i64,
    pub waste: i64,
    pub lag: i64,
}

/// Unweighted cost terms and their weighted total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    pub lateness: i64,
    pub waste: i64,
    pub off_preferred: i64,
    pub lag: i64,
    pub travel: i64,
    pub total: i64,
}

impl CostBreakdown {
    pub fn weighted(&self, w: &CostWeights) -> i64 {
        w.lateness * self.lateness
            + w.waste * self.waste
            + w.off_preferred * self.off_preferred
            + w.lag * self.lag
            + w.travel * self.travel
    }
}

/// Immutable snapshot of one incumbent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub cost: i64,
    pub breakdown: CostBreakdown,
    pub vehicles: Vec<VehicleRoute>,
    pub orders: Vec<OrderSummary>,
    /// Search node at which the incumbent was accepted.
    pub found_at_node: u64,
    pub time_origin: i64,
}

impl Schedule {
    /// Reads a fully bound model.
    pub fn extract(instance: &ProblemInstance, model: &DispatchModel, found_at_node: u64) -> Self {
        let store = model.store();
        let value = |v: VarId| store.min(v);
        let origin = instance.time_origin();

        let mut vehicles = Vec::with_capacity(instance.num_vehicles());
        for (v, vehicle) in instance.vehicles().iter().enumerate() {
            let used = value(model.deliveries()[v]) as usize;
            let trips = (0..used)
                .map(|d| Self::trip(instance, model.slot(v, d), store, origin))
                .collect();
            vehicles.push(VehicleRoute {
                vehicle: v,
                name: vehicle.name.clone(),
                trips,
            });
        }

        let mut orders = Vec::with_capacity(instance.num_orders());
        for (o, vars) in model.orders().iter().enumerate() {
            let order = &instance.orders()[o];
            let delivered = vehicles
                .iter()
                .flat_map(|r: &VehicleRoute| &r.trips)
                .filter(|t| t.order == o)
                .map(|t| t.delivered_volume)
                .sum();
            orders.push(OrderSummary {
                order: o,
                name: order.name.clone(),
                requested: order.total_volume,
                delivered,
                poured: value(vars.total_poured),
                deliveries: value(vars.count) as usize,
                lateness: value(vars.lateness),
                waste: value(vars.waste),
                lag: vars.lag.iter().map(|&l| value(l)).sum(),
            });
        }

        let trips = vehicles.iter().flat_map(|r| &r.trips);
        let mut breakdown = CostBreakdown {
            lateness: orders.iter().map(|o| o.lateness).sum(),
            waste: orders.iter().map(|o| o.waste).sum(),
            lag: orders.iter().map(|o| o.lag).sum(),
            off_preferred: trips.clone().filter(|t| t.off_preferred).count() as i64,
            travel: trips.map(|t| t.travel_to + t.travel_from).sum(),
            total: 0,
        };
        breakdown.total = breakdown.weighted(instance.weights());

        Self {
            cost: value(model.cost()),
            breakdown,
            vehicles,
            orders,
            found_at_node,
            time_origin: origin,
        }
    }

    fn trip(
        instance: &ProblemInstance,
        slot: &crate::model::SlotVars,
        store: &Store,
        origin: i64,
    ) -> Trip {
        let value = |v: VarId| store.min(v);
        let order = value(slot.order) as usize;
        Trip {
            slot: slot.index,
            order,
            order_name: instance.orders()[order].name.clone(),
            station: value(slot.station) as usize,
            load_time: value(slot.load) + origin,
            arrival_time: value(slot.arrival) + origin,
            unload_time: value(slot.unload) + origin,
            unload_duration: value(slot.duration),
            travel_to: value(slot.travel_to),
            travel_from: value(slot.travel_from),
            delivered_volume: value(slot.volume),
            poured_volume: value(slot.poured),
            off_preferred: value(slot.off_preferred) == 1,
        }
    }

    /// Trips of every vehicle serving `order`, in unload order.
    pub fn trips_for_order(&self, order: usize) -> Vec<&Trip> {
        let mut trips: Vec<&Trip> = self
            .vehicles
            .iter()
            .flat_map(|r| &r.trips)
            .filter(|t| t.order == order)
            .collect();
        trips.sort_by_key(|t| t.unload_time);
        trips
    }

    pub fn total_trips(&self) -> usize {
        self.vehicles.iter().map(|r| r.trips.len()).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.breakdown;
        writeln!(
            f,
            "cost {} (lateness {}, waste {}, off-preferred {}, lag {}, travel {})",
            self.cost, b.lateness, b.waste, b.off_preferred, b.lag, b.travel
        )?;
        for route in &self.vehicles {
            writeln!(f, "{}:", route.name)?;
            if route.trips.is_empty() {
                writeln!(f, "  idle")?;
            }
            for t in &route.trips {
                writeln!(
                    f,
                    "  #{} {} station {} load {} arrive {} unload {}..{} volume {}/{}",
                    t.slot,
                    t.order_name,
                    t.station,
                    t.load_time,
                    t.arrival_time,
                    t.unload_time,
                    t.unload_end(),
                    t.poured_volume,
                    t.delivered_volume,
                )?;
            }
        }
        for o in &self.orders {
            writeln!(
                f,
                "{}: poured {}/{} in {} deliveries, lateness {}, lag {}",
                o.name, o.poured, o.requested, o.deliveries, o.lateness, o.lag
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
