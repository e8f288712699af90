//! Construction-site orders.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Travel time used for station/yard pairs without a known route.
///
/// Large enough that any horizon derived from real durations rules the
/// pair out through propagation alone.
pub const UNREACHABLE: i64 = 5_000_000;

/// A construction site's request for concrete.
///
/// All times are integer minutes relative to the instance origin and all
/// volumes are integer volume units.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Order {
    pub name: String,
    pub total_volume: i64,
    /// Volume units discharged per minute.
    pub discharge_rate: i64,
    pub pump_reach: i64,
    pub preferred_station: Option<usize>,
    /// Earliest time unloading may begin.
    pub start_time: i64,
    /// Delay between arrival at the yard and the start of unloading.
    pub setup_time: i64,
    /// Whether vehicles may deliver above their nominal volume.
    pub overload_allowed: bool,
    /// Minutes from each station to this order's yard.
    pub travel_to_yard: Vec<i64>,
    /// Minutes from this order's yard back to each station.
    pub travel_from_yard: Vec<i64>,
}

impl Order {
    /// Creates an order whose travel tables are all [`UNREACHABLE`].
    pub fn new(
        name: impl Into<String>,
        total_volume: i64,
        discharge_rate: i64,
        pump_reach: i64,
        start_time: i64,
        num_stations: usize,
    ) -> Self {
        Self {
            name: name.into(),
            total_volume,
            discharge_rate,
            pump_reach,
            preferred_station: None,
            start_time,
            setup_time: 0,
            overload_allowed: false,
            travel_to_yard: vec![UNREACHABLE; num_stations],
            travel_from_yard: vec![UNREACHABLE; num_stations],
        }
    }

    pub fn with_preferred_station(mut self, station: usize) -> Self {
        self.preferred_station = Some(station);
        self
    }

    pub fn with_setup_time(mut self, minutes: i64) -> Self {
        self.setup_time = minutes;
        self
    }

    pub fn with_overload_allowed(mut self, allowed: bool) -> Self {
        self.overload_allowed = allowed;
        self
    }

    /// Sets both travel directions between `station` and the yard.
    pub fn with_travel(mut self, station: usize, to_yard: i64, from_yard: i64) -> Self {
        self.set_travel_to_yard(station, to_yard);
        self.set_travel_from_yard(station, from_yard);
        self
    }

    /// Overwrites the sentinel for one station. Unknown stations are ignored.
    pub fn set_travel_to_yard(&mut self, station: usize, minutes: i64) {
        if let Some(slot) = self.travel_to_yard.get_mut(station) {
            *slot = minutes;
        }
    }

    /// Overwrites the sentinel for one station. Unknown stations are ignored.
    pub fn set_travel_from_yard(&mut self, station: usize, minutes: i64) {
        if let Some(slot) = self.travel_from_yard.get_mut(station) {
            *slot = minutes;
        }
    }

    /// Returns true if `station` has a known route in both directions.
    pub fn is_reachable_from(&self, station: usize) -> bool {
        let known = |table: &[i64]| table.get(station).is_some_and(|&t| t < UNREACHABLE);
        known(&self.travel_to_yard) && known(&self.travel_from_yard)
    }
}
