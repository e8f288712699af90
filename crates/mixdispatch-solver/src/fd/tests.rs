//! Tests for domains, the trail, and the fixpoint loop.

use super::propagators::LinearLe;
use super::*;

#[test]
fn test_domain_from_values_merges_runs() {
    let d = Domain::from_values([5, 1, 2, 3, 9, 2]);
    assert_eq!(d.intervals().len(), 3);
    assert_eq!(d.size(), 5);
    assert_eq!(d.min(), 1);
    assert_eq!(d.max(), 9);
    assert_eq!(d.values().collect::<Vec<_>>(), vec![1, 2, 3, 5, 9]);
}

#[test]
fn test_domain_remove_splits_interval() {
    let mut d = Domain::range(0, 10);
    assert!(d.remove(4));
    assert!(!d.remove(4));
    assert_eq!(d.intervals().len(), 2);
    assert!(!d.contains(4));
    assert_eq!(d.next_after(3), Some(5));
    assert_eq!(d.next_after(10), None);
}

#[test]
fn test_domain_intersect_range_and_fixed() {
    let mut d = Domain::from_values([0, 1, 2, 7]);
    assert!(d.intersect_range(2, 6));
    assert!(d.is_fixed());
    assert_eq!(d.value(), Some(2));
    assert!(!d.intersect_range(0, 10));
}

#[test]
fn test_domain_intersect_domains() {
    let mut a = Domain::range(0, 10);
    let b = Domain::from_values([3, 4, 8, 12]);
    assert!(a.intersect(&b));
    assert_eq!(a.values().collect::<Vec<_>>(), vec![3, 4, 8]);
}

#[test]
fn test_domain_restrict_and_retain() {
    let mut d = Domain::range(0, 9);
    assert!(d.restrict_min(2));
    assert!(d.restrict_max(7));
    assert!(!d.restrict_max(7));
    assert!(d.retain(|v| v % 2 == 0));
    assert_eq!(d.values().collect::<Vec<_>>(), vec![2, 4, 6]);
    assert!(!d.retain(|_| true));
}

#[test]
fn test_store_retain_is_trailed() {
    let mut store = Store::new();
    let x = store.new_var(Domain::range(0, 5));
    store.push_level();
    assert_eq!(store.retain(x, |v| v > 3), Ok(true));
    assert_eq!(store.min(x), 4);
    assert_eq!(store.retain(x, |_| false), Err(Conflict));
    store.pop_level();
    assert_eq!(store.domain(x).size(), 6);
}

#[test]
fn test_domain_debug_format() {
    let d = Domain::from_values([0, 1, 2, 5]);
    assert_eq!(format!("{d:?}"), "{0..2,5}");
}

#[test]
fn test_store_empty_domain_is_conflict() {
    let mut store = Store::new();
    let x = store.new_var(Domain::range(0, 3));
    assert_eq!(store.set_min(x, 4), Err(Conflict));
    // failed narrowing leaves the domain untouched
    assert_eq!(store.domain(x).size(), 4);
}

#[test]
fn test_store_trail_restores_exactly() {
    let mut store = Store::new();
    let x = store.new_var(Domain::range(0, 9));
    let y = store.new_var(Domain::range(0, 9));

    store.push_level();
    store.set_min(x, 3).unwrap();
    store.set_max(x, 6).unwrap();
    store.push_level();
    store.assign(x, 4).unwrap();
    store.remove_value(y, 0).unwrap();
    assert_eq!(store.depth(), 2);

    store.pop_level();
    assert_eq!(store.min(x), 3);
    assert_eq!(store.max(x), 6);
    assert_eq!(store.min(y), 0);

    store.pop_level();
    assert_eq!(store.domain(x).size(), 10);
    assert_eq!(store.depth(), 0);
}

#[test]
fn test_store_reports_modified_vars() {
    let mut store = Store::new();
    let x = store.new_var(Domain::range(0, 9));
    let y = store.new_var(Domain::range(0, 9));
    store.set_max(x, 5).unwrap();
    store.set_max(y, 12).unwrap();
    assert_eq!(store.take_modified(), vec![x]);
    assert!(store.take_modified().is_empty());
}

#[test]
fn test_network_chains_to_fixpoint() {
    let mut net = ConstraintNetwork::new();
    let x = net.new_var(Domain::range(0, 20));
    let y = net.new_var(Domain::range(0, 20));
    let z = net.new_var(Domain::range(0, 20));
    // x + 2 <= y, y + 3 <= z
    net.post(LinearLe::new(vec![(1, x), (-1, y)], -2));
    net.post(LinearLe::new(vec![(1, y), (-1, z)], -3));
    net.propagate().unwrap();

    assert_eq!(net.store().min(z), 5);
    assert_eq!(net.store().max(x), 15);

    net.push_level();
    net.store_mut().set_min(x, 10).unwrap();
    net.propagate().unwrap();
    assert_eq!(net.store().min(z), 15);
    net.pop_level();
    assert_eq!(net.store().min(z), 5);
}

#[test]
fn test_network_recovers_after_conflict() {
    let mut net = ConstraintNetwork::new();
    let x = net.new_var(Domain::range(0, 5));
    let y = net.new_var(Domain::range(0, 5));
    net.post(LinearLe::new(vec![(1, x), (1, y)], 3));
    net.propagate().unwrap();
    assert_eq!(net.store().max(y), 3);

    net.push_level();
    net.store_mut().assign(x, 3).unwrap();
    net.store_mut().set_min(y, 1).unwrap();
    assert_eq!(net.propagate(), Err(Conflict));
    net.pop_level();

    net.push_level();
    net.store_mut().assign(x, 1).unwrap();
    net.propagate().unwrap();
    assert_eq!(net.store().max(y), 2);
    net.pop_level();
    assert_eq!(net.store().max(y), 3);
}

#[test]
fn test_empty_variable_fails_network() {
    let mut net = ConstraintNetwork::new();
    net.new_var(Domain::range(0, -1));
    assert!(net.is_failed());
    assert_eq!(net.propagate(), Err(Conflict));
}
