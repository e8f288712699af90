//! Reference scenarios.
//!
//! Each function documents the optimum it admits so tests can assert on
//! it. Times are in minutes, volumes in cubic metres.

use mixdispatch_core::{Order, ProblemInstance, Station, Vehicle};

use crate::order;

fn build(orders: Vec<Order>, vehicles: Vec<Vehicle>, stations: Vec<Station>) -> ProblemInstance {
    match ProblemInstance::new(orders, vehicles, stations) {
        Ok(instance) => instance,
        Err(e) => panic!("invalid fixture: {e}"),
    }
}

/// One order of 1 m³ due at 5, one matching truck, one depot.
///
/// Optimum: a single trip loading by time 2, arriving by 5 and unloading at
/// 5. Cost 80: travel 2 out and 2 back to the depot at weight 20.
pub fn trivial() -> ProblemInstance {
    build(
        vec![order("site-a", 1, 5, 1, 2)],
        vec![Vehicle::new("truck-1", 1, 10, 1)],
        vec![Station::new("depot", 1)],
    )
}

/// One order of 6 m³ and a single 2 m³ truck.
///
/// Optimum: three back-to-back trips unloading at 2, 7 and 12. Cost 260:
/// lateness 2, lag 3 + 3 and travel 6.
pub fn multi_trip() -> ProblemInstance {
    build(
        vec![order("slab", 6, 0, 1, 1)],
        vec![Vehicle::new("truck-1", 2, 10, 1)],
        vec![Station::new("depot", 1)],
    )
}

/// Two orders due at 0 and two trucks sharing a depot that loads one truck
/// at a time for 2 minutes.
///
/// Optimum: one trip per truck, the second loading at 2. Cost 160:
/// lateness 3 + 5 and travel 4.
pub fn contention() -> ProblemInstance {
    build(
        vec![order("north", 2, 0, 1, 1), order("south", 2, 0, 1, 1)],
        vec![
            Vehicle::new("truck-1", 2, 10, 1),
            Vehicle::new("truck-2", 2, 10, 1),
        ],
        vec![Station::new("depot", 2)],
    )
}

/// An order whose pump reach no truck can meet.
pub fn unreachable_pump() -> ProblemInstance {
    let tower = Order::new("tower", 2, 1, 50, 0, 1).with_travel(0, 1, 1);
    build(
        vec![tower],
        vec![Vehicle::new("truck-1", 2, 20, 1), Vehicle::new("truck-2", 4, 30, 2)],
        vec![Station::new("depot", 1)],
    )
}

/// A two-trip order preferring station 1, equally far from both stations.
///
/// The first trip must load at the depot; the optimum loads the second at
/// the preferred station.
pub fn preferred_station() -> ProblemInstance {
    build(
        vec![order("plaza", 4, 0, 2, 1).with_preferred_station(1)],
        vec![Vehicle::new("truck-1", 2, 10, 1)],
        vec![Station::new("depot", 1), Station::new("quarry", 1)],
    )
}

/// An order of 6 m³ served by a 4 m³ and a 2 m³ truck.
///
/// Optimum: one trip per truck, the second unloading as soon as the first
/// finishes. Cost 100: lateness 2, no lag and travel 4. Lag is measured
/// from the end of the previous unload, so the mixed durations never add
/// to it.
pub fn mixed_fleet() -> ProblemInstance {
    build(
        vec![order("pour", 6, 0, 1, 1)],
        vec![
            Vehicle::new("mixer-4", 4, 10, 1),
            Vehicle::new("mixer-2", 2, 10, 1),
        ],
        vec![Station::new("depot", 1)],
    )
}

/// An order pouring at rate 2 after a 4 minute setup, a truck too slow to
/// discharge it, and a compatible truck that only comes free at 10.
///
/// Optimum: the late truck loads at 10, arrives at 15 and unloads at 19.
/// Cost 310: lateness 19 and travel 3 + 3.
pub fn staggered_start() -> ProblemInstance {
    let deck = Order::new("deck", 2, 2, 10, 0, 1)
        .with_travel(0, 3, 3)
        .with_setup_time(4);
    build(
        vec![deck],
        vec![
            Vehicle::new("slow", 2, 10, 1),
            Vehicle::new("late", 2, 10, 2).with_available_from(10),
        ],
        vec![Station::new("depot", 2)],
    )
}
