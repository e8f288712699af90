//! Tests for the listener plumbing.

use super::*;
use crate::report::CostBreakdown;

fn schedule(cost: i64) -> Schedule {
    Schedule {
        cost,
        breakdown: CostBreakdown::default(),
        vehicles: Vec::new(),
        orders: Vec::new(),
        found_at_node: 7,
        time_origin: 0,
    }
}

#[test]
fn test_event_support_new() {
    let support = SolveEventSupport::new();

    assert_eq!(support.listener_count(), 0);
    assert!(!support.has_listeners());
}

#[test]
fn test_event_support_fire_events() {
    let mut support = SolveEventSupport::new();
    let listener = Arc::new(CountingListener::new());
    support.add_listener(listener.clone());

    support.fire_incumbent(&schedule(30));
    support.fire_incumbent(&schedule(20));
    support.fire_search_finished(SearchStatus::Optimal, Some(&schedule(20)));

    assert_eq!(listener.incumbent_count(), 2);
    assert_eq!(listener.finished_count(), 1);
    assert_eq!(listener.costs(), vec![30, 20]);
    assert_eq!(listener.last_status(), Some(SearchStatus::Optimal));
}

#[test]
fn test_counting_listener_reset() {
    let listener = CountingListener::new();
    listener.on_incumbent(&schedule(5));
    listener.on_search_finished(SearchStatus::Truncated, None);
    listener.reset();

    assert_eq!(listener.incumbent_count(), 0);
    assert_eq!(listener.finished_count(), 0);
    assert!(listener.costs().is_empty());
    assert_eq!(listener.last_status(), None);
}

#[test]
fn test_clear_listeners() {
    let mut support = SolveEventSupport::new();
    support.add_listener(Arc::new(LoggingListener::with_prefix("[test] ")));
    support.add_listener(Arc::new(CountingListener::new()));
    assert_eq!(support.listener_count(), 2);

    support.clear_listeners();
    assert!(!support.has_listeners());
}

#[test]
fn test_channel_listener_streams_events() {
    let (listener, mut receiver) = ChannelListener::channel();
    listener.on_incumbent(&schedule(12));
    listener.on_search_finished(SearchStatus::Optimal, Some(&schedule(12)));

    match receiver.try_recv() {
        Ok(SolveEvent::Incumbent(s)) => assert_eq!(s.cost, 12),
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(
        receiver.try_recv().ok(),
        Some(SolveEvent::Finished {
            status: SearchStatus::Optimal,
            best_cost: Some(12),
        })
    );
    assert!(receiver.try_recv().is_err());
}

#[test]
fn test_channel_listener_ignores_closed_receiver() {
    let (listener, receiver) = ChannelListener::channel();
    drop(receiver);
    listener.on_incumbent(&schedule(1));
}
