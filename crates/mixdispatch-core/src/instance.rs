//! The immutable Problem Instance and its derived tables.

use crate::error::{ProblemError, Result};
use crate::{CostWeights, Order, Station, Vehicle, UNREACHABLE};

/// Numeric bounds that size the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Upper bound on the trips any single order could need.
    pub max_deliveries_per_order: usize,
    /// Last representable timestamp.
    pub max_time_stamp: i64,
}

/// Normalized input for one solve.
///
/// Built once by [`ProblemInstance::new`], which validates the records,
/// rebases all timestamps so the earliest order start or vehicle
/// availability is 0, and precomputes the order×vehicle volume and
/// duration tables together with the [`Bounds`].
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    orders: Vec<Order>,
    vehicles: Vec<Vehicle>,
    stations: Vec<Station>,
    weights: CostWeights,
    time_origin: i64,
    start_times: Vec<i64>,
    available_from: Vec<i64>,
    // Flat order-major tables, index `order * num_vehicles + vehicle`.
    volumes: Vec<i64>,
    unload_durations: Vec<i64>,
    compatible: Vec<bool>,
    bounds: Bounds,
}

impl ProblemInstance {
    /// Validates the records and derives all lookup tables.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError`] when a travel table has the wrong length, a
    /// preferred station does not exist, or a quantity is negative.
    pub fn new(orders: Vec<Order>, vehicles: Vec<Vehicle>, stations: Vec<Station>) -> Result<Self> {
        validate(&orders, &vehicles, &stations)?;

        let time_origin = orders
            .iter()
            .map(|o| o.start_time)
            .chain(vehicles.iter().map(|v| v.available_from))
            .min()
            .unwrap_or(0);
        let start_times = orders.iter().map(|o| o.start_time - time_origin).collect();
        let available_from = vehicles
            .iter()
            .map(|v| v.available_from - time_origin)
            .collect();

        let mut volumes = Vec::with_capacity(orders.len() * vehicles.len());
        let mut unload_durations = Vec::with_capacity(orders.len() * vehicles.len());
        let mut compatible = Vec::with_capacity(orders.len() * vehicles.len());
        for order in &orders {
            for vehicle in &vehicles {
                let volume = vehicle.deliverable_volume(order.overload_allowed);
                volumes.push(volume);
                unload_durations.push(if order.discharge_rate > 0 {
                    volume / order.discharge_rate
                } else {
                    0
                });
                compatible.push(vehicle.can_serve(order));
            }
        }

        let mut instance = Self {
            orders,
            vehicles,
            stations,
            weights: CostWeights::default(),
            time_origin,
            start_times,
            available_from,
            volumes,
            unload_durations,
            compatible,
            bounds: Bounds {
                max_deliveries_per_order: 1,
                max_time_stamp: 0,
            },
        };
        instance.bounds = instance.derive_bounds();
        Ok(instance)
    }

    /// Replaces the objective weights.
    pub fn with_weights(mut self, weights: CostWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Overrides the derived horizon.
    ///
    /// The horizon stays below [`UNREACHABLE`] so sentinel routes never fit.
    pub fn with_max_time_stamp(mut self, max_time_stamp: i64) -> Self {
        self.bounds.max_time_stamp = max_time_stamp.clamp(0, UNREACHABLE - 1);
        self
    }

    fn derive_bounds(&self) -> Bounds {
        let min_capacity = self
            .vehicles
            .iter()
            .map(|v| v.deliverable_volume(false))
            .filter(|&c| c > 0)
            .min()
            .unwrap_or(1);
        let max_deliveries_per_order = self
            .orders
            .iter()
            .map(|o| ceil_div(o.total_volume, min_capacity) as usize + 1)
            .max()
            .unwrap_or(1);

        let latest_start = self
            .start_times
            .iter()
            .chain(self.available_from.iter())
            .copied()
            .max()
            .unwrap_or(0);
        let worst_cycle = finite_max(self.stations.iter().map(|s| s.loading_time))
            + finite_max(self.orders.iter().flat_map(|o| o.travel_to_yard.iter().copied()))
            + finite_max(self.orders.iter().map(|o| o.setup_time))
            + finite_max(self.unload_durations.iter().copied())
            + finite_max(self.orders.iter().flat_map(|o| o.travel_from_yard.iter().copied()));
        let slots_per_vehicle = (self.orders.len() * max_deliveries_per_order) as i64;

        Bounds {
            max_deliveries_per_order,
            max_time_stamp: (latest_start + slots_per_vehicle * worst_cycle).min(UNREACHABLE - 1),
        }
    }

    pub fn num_orders(&self) -> usize {
        self.orders.len()
    }

    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    pub fn num_stations(&self) -> usize {
        self.stations.len()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn weights(&self) -> &CostWeights {
        &self.weights
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Trip slots owned by each vehicle.
    pub fn slots_per_vehicle(&self) -> usize {
        self.orders.len() * self.bounds.max_deliveries_per_order
    }

    /// Absolute time that maps to relative timestamp 0.
    pub fn time_origin(&self) -> i64 {
        self.time_origin
    }

    /// Rebased earliest start of `order`.
    pub fn start_time(&self, order: usize) -> i64 {
        self.start_times[order]
    }

    /// Rebased availability of `vehicle`.
    pub fn available_from(&self, vehicle: usize) -> i64 {
        self.available_from[vehicle]
    }

    pub fn deliverable_volume(&self, order: usize, vehicle: usize) -> i64 {
        self.volumes[order * self.vehicles.len() + vehicle]
    }

    pub fn unload_duration(&self, order: usize, vehicle: usize) -> i64 {
        self.unload_durations[order * self.vehicles.len() + vehicle]
    }

    pub fn is_compatible(&self, order: usize, vehicle: usize) -> bool {
        self.compatible[order * self.vehicles.len() + vehicle]
    }

    pub fn travel_to_yard(&self, order: usize, station: usize) -> i64 {
        self.orders[order].travel_to_yard[station]
    }

    pub fn travel_from_yard(&self, order: usize, station: usize) -> i64 {
        self.orders[order].travel_from_yard[station]
    }

    pub fn loading_time(&self, station: usize) -> i64 {
        self.stations[station].loading_time
    }
}

/// Largest routable value, ignoring the [`UNREACHABLE`] sentinel.
fn finite_max(values: impl Iterator<Item = i64>) -> i64 {
    values.filter(|&t| t < UNREACHABLE).max().unwrap_or(0)
}

fn ceil_div(a: i64, b: i64) -> i64 {
    if a <= 0 {
        0
    } else {
        (a + b - 1) / b
    }
}

fn validate(orders: &[Order], vehicles: &[Vehicle], stations: &[Station]) -> Result<()> {
    let num_stations = stations.len();
    let non_negative = |entity, name: &str, field, value: i64| {
        if value < 0 {
            Err(ProblemError::Negative {
                entity,
                name: name.to_string(),
                field,
                value,
            })
        } else {
            Ok(())
        }
    };

    for order in orders {
        non_negative("order", &order.name, "total_volume", order.total_volume)?;
        non_negative("order", &order.name, "discharge_rate", order.discharge_rate)?;
        non_negative("order", &order.name, "pump_reach", order.pump_reach)?;
        non_negative("order", &order.name, "setup_time", order.setup_time)?;
        for (direction, table) in [
            ("to-yard", &order.travel_to_yard),
            ("from-yard", &order.travel_from_yard),
        ] {
            if table.len() != num_stations {
                return Err(ProblemError::TravelTableLength {
                    order: order.name.clone(),
                    direction,
                    expected: num_stations,
                    actual: table.len(),
                });
            }
            for &minutes in table.iter() {
                non_negative("order", &order.name, "travel time", minutes)?;
            }
        }
        if let Some(station) = order.preferred_station {
            if station >= num_stations {
                return Err(ProblemError::UnknownPreferredStation {
                    order: order.name.clone(),
                    station,
                    num_stations,
                });
            }
        }
    }

    for vehicle in vehicles {
        non_negative("vehicle", &vehicle.name, "nominal_volume", vehicle.nominal_volume)?;
        non_negative("vehicle", &vehicle.name, "max_volume", vehicle.max_volume)?;
        non_negative("vehicle", &vehicle.name, "pump_reach", vehicle.pump_reach)?;
        non_negative(
            "vehicle",
            &vehicle.name,
            "max_discharge_rate",
            vehicle.max_discharge_rate,
        )?;
    }

    for station in stations {
        non_negative("station", &station.name, "loading_time", station.loading_time)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests;
