//! Mixer trucks.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Order;

/// A mixer truck with pump and volume capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vehicle {
    pub name: String,
    pub pump_reach: i64,
    pub max_discharge_rate: i64,
    pub nominal_volume: i64,
    /// Overload capacity; equal to `nominal_volume` when there is none.
    pub max_volume: i64,
    pub available_from: i64,
}

impl Vehicle {
    /// Creates a vehicle without overload capacity, available at time 0.
    pub fn new(
        name: impl Into<String>,
        nominal_volume: i64,
        pump_reach: i64,
        max_discharge_rate: i64,
    ) -> Self {
        Self {
            name: name.into(),
            pump_reach,
            max_discharge_rate,
            nominal_volume,
            max_volume: nominal_volume,
            available_from: 0,
        }
    }

    pub fn with_max_volume(mut self, volume: i64) -> Self {
        self.max_volume = volume;
        self
    }

    pub fn with_available_from(mut self, time: i64) -> Self {
        self.available_from = time;
        self
    }

    /// Volume this vehicle carries on one trip.
    ///
    /// # Examples
    ///
    /// ```
    /// use mixdispatch_core::Vehicle;
    ///
    /// let truck = Vehicle::new("t", 8, 20, 2).with_max_volume(10);
    /// assert_eq!(truck.deliverable_volume(false), 8);
    /// assert_eq!(truck.deliverable_volume(true), 10);
    /// ```
    pub fn deliverable_volume(&self, overload_allowed: bool) -> i64 {
        if self.max_volume == self.nominal_volume {
            self.max_volume
        } else if overload_allowed && self.max_volume > 0 {
            self.max_volume
        } else {
            self.nominal_volume
        }
    }

    /// Returns true if this vehicle's pump can serve `order`.
    pub fn can_serve(&self, order: &Order) -> bool {
        order.pump_reach <= self.pump_reach && order.discharge_rate <= self.max_discharge_rate
    }
}
