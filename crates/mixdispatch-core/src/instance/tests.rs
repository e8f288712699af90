//! Tests for problem instance construction.

use super::*;

fn order(volume: i64, stations: usize) -> Order {
    let mut o = Order::new("o", volume, 1, 10, 5, stations);
    for s in 0..stations {
        o = o.with_travel(s, 2, 3);
    }
    o
}

#[test]
fn test_max_deliveries_uses_smallest_capacity() {
    let instance = ProblemInstance::new(
        vec![order(7, 1), order(2, 1)],
        vec![Vehicle::new("big", 6, 20, 2), Vehicle::new("small", 3, 20, 2)],
        vec![Station::new("depot", 1)],
    )
    .unwrap();

    // ceil(7 / 3) + 1
    assert_eq!(instance.bounds().max_deliveries_per_order, 4);
    assert_eq!(instance.slots_per_vehicle(), 8);
}

#[test]
fn test_no_vehicles_is_not_an_error() {
    let instance = ProblemInstance::new(vec![order(3, 1)], vec![], vec![Station::new("d", 0)]).unwrap();
    assert_eq!(instance.num_vehicles(), 0);
    assert_eq!(instance.bounds().max_deliveries_per_order, 4);
}

#[test]
fn test_horizon_covers_worst_cycle() {
    let instance = ProblemInstance::new(
        vec![order(2, 1).with_setup_time(1)],
        vec![Vehicle::new("t", 2, 20, 2).with_available_from(9)],
        vec![Station::new("depot", 4)],
    )
    .unwrap();

    // origin 5: start 0, availability 4.
    assert_eq!(instance.time_origin(), 5);
    assert_eq!(instance.start_time(0), 0);
    assert_eq!(instance.available_from(0), 4);
    // slots = 1 * (1 + 1); cycle = load 4 + to 2 + setup 1 + unload 2 + from 3
    assert_eq!(instance.bounds().max_time_stamp, 4 + 2 * 12);
}

#[test]
fn test_unreachable_travel_ignored_in_horizon() {
    let o = Order::new("o", 1, 1, 0, 0, 2).with_travel(0, 1, 1);
    let instance = ProblemInstance::new(
        vec![o],
        vec![Vehicle::new("t", 1, 0, 1)],
        vec![Station::new("a", 1), Station::new("b", 1)],
    )
    .unwrap();

    assert!(instance.bounds().max_time_stamp < UNREACHABLE);
    assert_eq!(instance.travel_to_yard(0, 1), UNREACHABLE);
}

#[test]
fn test_volume_and_duration_tables() {
    let o = order(10, 1).with_overload_allowed(true);
    let mut slow = order(10, 1);
    slow.discharge_rate = 0;
    let instance = ProblemInstance::new(
        vec![o, slow],
        vec![Vehicle::new("t", 4, 20, 2).with_max_volume(5)],
        vec![Station::new("d", 1)],
    )
    .unwrap();

    assert_eq!(instance.deliverable_volume(0, 0), 5);
    assert_eq!(instance.unload_duration(0, 0), 5);
    assert_eq!(instance.deliverable_volume(1, 0), 4);
    assert_eq!(instance.unload_duration(1, 0), 0);
}

#[test]
fn test_compatibility() {
    let mut needy = order(1, 1);
    needy.pump_reach = 50;
    let instance = ProblemInstance::new(
        vec![order(1, 1), needy],
        vec![Vehicle::new("t", 4, 20, 2)],
        vec![Station::new("d", 1)],
    )
    .unwrap();

    assert!(instance.is_compatible(0, 0));
    assert!(!instance.is_compatible(1, 0));
}

#[test]
fn test_travel_table_length_error() {
    let err = ProblemInstance::new(vec![order(1, 2)], vec![], vec![Station::new("d", 1)]).unwrap_err();
    assert!(matches!(
        err,
        ProblemError::TravelTableLength {
            expected: 1,
            actual: 2,
            ..
        }
    ));
}

#[test]
fn test_unknown_preferred_station_error() {
    let err = ProblemInstance::new(
        vec![order(1, 1).with_preferred_station(3)],
        vec![],
        vec![Station::new("d", 1)],
    )
    .unwrap_err();
    assert!(matches!(err, ProblemError::UnknownPreferredStation { station: 3, .. }));
}

#[test]
fn test_negative_volume_error() {
    let err = ProblemInstance::new(vec![order(-1, 1)], vec![], vec![Station::new("d", 1)]).unwrap_err();
    assert!(err.to_string().contains("negative total_volume"));
}

#[test]
fn test_max_time_stamp_override() {
    let instance = ProblemInstance::new(vec![order(1, 1)], vec![], vec![Station::new("d", 1)])
        .unwrap()
        .with_max_time_stamp(42);
    assert_eq!(instance.bounds().max_time_stamp, 42);
}

#[test]
fn test_max_time_stamp_stays_below_unreachable() {
    let instance = ProblemInstance::new(vec![order(1, 1)], vec![], vec![Station::new("d", 1)])
        .unwrap()
        .with_max_time_stamp(UNREACHABLE + 10);
    assert_eq!(instance.bounds().max_time_stamp, UNREACHABLE - 1);
}

#[test]
fn test_derived_horizon_stays_below_unreachable() {
    let o = Order::new("o", 1, 1, 0, 0, 1).with_travel(0, UNREACHABLE - 1, 1);
    let instance = ProblemInstance::new(
        vec![o],
        vec![Vehicle::new("t", 1, 0, 1)],
        vec![Station::new("d", 1)],
    )
    .unwrap();
    assert_eq!(instance.bounds().max_time_stamp, UNREACHABLE - 1);
}
