//! Tests for schedule extraction and rendering.

use mixdispatch_config::SolverConfig;
use mixdispatch_core::{Order, Station, Vehicle};
use mixdispatch_test::scenarios;

use super::*;
use crate::Solver;

fn solve(instance: &ProblemInstance) -> Schedule {
    Solver::new(SolverConfig::default())
        .solve(instance)
        .best
        .expect("scenario is feasible")
}

#[test]
fn test_single_trip_schedule() {
    let schedule = solve(&scenarios::trivial());

    assert_eq!(schedule.cost, 80);
    assert_eq!(schedule.total_trips(), 1);
    let trip = &schedule.vehicles[0].trips[0];
    assert_eq!(trip.order, 0);
    assert_eq!(trip.order_name, "site-a");
    assert_eq!(trip.station, 0);
    assert_eq!(trip.unload_time, 5);
    assert!(trip.arrival_time <= trip.unload_time);
    assert_eq!(trip.travel_to, 2);
    assert_eq!(trip.travel_from, 2);
    assert_eq!(trip.delivered_volume, 1);
    assert_eq!(trip.poured_volume, 1);
    assert!(!trip.off_preferred);

    let summary = &schedule.orders[0];
    assert_eq!(summary.deliveries, 1);
    assert_eq!(summary.poured, 1);
    assert_eq!(summary.lateness, 0);
    assert_eq!(summary.waste, 0);
}

#[test]
fn test_last_trip_pays_return_to_depot() {
    let site = Order::new("site", 1, 1, 10, 10, 1).with_travel(0, 2, 7);
    let instance = ProblemInstance::new(
        vec![site],
        vec![Vehicle::new("truck", 1, 10, 1)],
        vec![Station::new("depot", 1)],
    )
    .unwrap();
    let schedule = solve(&instance);

    let trip = &schedule.vehicles[0].trips[0];
    assert_eq!(trip.travel_to, 2);
    assert_eq!(trip.travel_from, 7);
    assert_eq!(schedule.breakdown.travel, 9);
    assert_eq!(schedule.cost, 180);
}

#[test]
fn test_lag_counts_from_previous_unload_end() {
    let schedule = solve(&scenarios::mixed_fleet());
    let trips = schedule.trips_for_order(0);
    assert_eq!(trips.len(), 2);

    let durations: Vec<i64> = trips.iter().map(|t| t.unload_duration).collect();
    assert!(durations.contains(&4) && durations.contains(&2));
    let mut gaps = 0;
    for pair in trips.windows(2) {
        let gap = pair[1].unload_time - pair[0].unload_end();
        assert!(gap >= 0);
        gaps += gap;
    }
    assert_eq!(schedule.orders[0].lag, gaps);
    assert_eq!(schedule.orders[0].lag, 0);
    assert_eq!(schedule.cost, 100);
}

#[test]
fn test_breakdown_matches_cost() {
    let instance = scenarios::multi_trip();
    let schedule = solve(&instance);

    assert_eq!(schedule.breakdown.total, schedule.cost);
    assert_eq!(schedule.breakdown.weighted(instance.weights()), schedule.cost);
    assert_eq!(schedule.breakdown.lateness, 2);
    assert_eq!(schedule.breakdown.lag, 6);
    assert_eq!(schedule.breakdown.travel, 6);
}

#[test]
fn test_trips_for_order_sorted_by_unload() {
    let schedule = solve(&scenarios::multi_trip());
    let trips = schedule.trips_for_order(0);

    let unloads: Vec<i64> = trips.iter().map(|t| t.unload_time).collect();
    assert_eq!(unloads, vec![2, 7, 12]);
}

#[test]
fn test_display_lists_routes_and_orders() {
    let schedule = solve(&scenarios::trivial());
    let text = schedule.to_string();

    assert!(text.starts_with("cost 80"));
    assert!(text.contains("truck-1:"));
    assert!(text.contains("site-a: poured 1/1 in 1 deliveries"));
}

#[test]
fn test_json_output() {
    let schedule = solve(&scenarios::trivial());
    let json = schedule.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["cost"], 80);
    assert_eq!(value["vehicles"][0]["trips"][0]["unload_time"], 5);
    assert_eq!(value["orders"][0]["name"], "site-a");
}
