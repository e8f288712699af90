//! Tests for the individual propagators.

use super::*;
use crate::fd::{Conflict, ConstraintNetwork, Domain, Lit, VarId};

fn var(net: &mut ConstraintNetwork, lo: i64, hi: i64) -> VarId {
    net.new_var(Domain::range(lo, hi))
}

#[test]
fn test_linear_bounds() {
    let mut net = ConstraintNetwork::new();
    let x = var(&mut net, 0, 10);
    let y = var(&mut net, 0, 10);
    // 2x - 3y <= -6 forces y >= 2
    net.post(LinearLe::new(vec![(2, x), (-3, y)], -6));
    net.propagate().unwrap();
    assert_eq!(net.store().min(y), 2);
    assert_eq!(net.store().max(x), 10);

    net.store_mut().set_min(x, 6).unwrap();
    net.propagate().unwrap();
    // 12 - 3y <= -6 => y >= 6
    assert_eq!(net.store().min(y), 6);
}

#[test]
fn test_linear_equality() {
    let mut net = ConstraintNetwork::new();
    let x = var(&mut net, 0, 10);
    let y = var(&mut net, 0, 10);
    let z = var(&mut net, 0, 100);
    for p in LinearLe::equality(vec![(1, x), (1, y), (-1, z)], 0, None) {
        net.post(p);
    }
    net.store_mut().assign(x, 4).unwrap();
    net.store_mut().assign(y, 7).unwrap();
    net.propagate().unwrap();
    assert_eq!(net.store().value(z), Some(11));
}

#[test]
fn test_guarded_linear_falsifies_guard() {
    let mut net = ConstraintNetwork::new();
    let b = net.new_bool();
    let x = var(&mut net, 5, 10);
    // b => x <= 3
    net.post(LinearLe::new(vec![(1, x)], 3).guarded(Lit::pos(b)));
    net.propagate().unwrap();
    assert_eq!(net.store().value(b), Some(0));
}

#[test]
fn test_negative_guard_enforces_when_false() {
    let mut net = ConstraintNetwork::new();
    let b = net.new_bool();
    let x = var(&mut net, 0, 10);
    // !b => x <= 0
    net.post(LinearLe::new(vec![(1, x)], 0).guarded(Lit::neg(b)));
    net.propagate().unwrap();
    assert_eq!(net.store().max(x), 10);

    net.store_mut().assign(b, 0).unwrap();
    net.propagate().unwrap();
    assert_eq!(net.store().value(x), Some(0));
}

#[test]
fn test_element_const_prunes_both_ways() {
    let mut net = ConstraintNetwork::new();
    let i = var(&mut net, 0, 10);
    let r = var(&mut net, 0, 100);
    net.post(ElementConst::new(i, vec![7, 3, 9, 3], r));
    net.propagate().unwrap();
    assert_eq!(net.store().max(i), 3);
    assert_eq!((net.store().min(r), net.store().max(r)), (3, 9));

    net.store_mut().set_max(r, 5).unwrap();
    net.propagate().unwrap();
    assert_eq!(net.store().domain(i).values().collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(net.store().value(r), Some(3));
}

#[test]
fn test_element_const_index_holes_restore_on_backtrack() {
    let mut net = ConstraintNetwork::new();
    let i = var(&mut net, 0, 5);
    let r = net.new_var(Domain::from_values([1, 4]));
    net.post(ElementConst::new(i, vec![1, 2, 4, 2, 1, 3], r));
    net.propagate().unwrap();
    assert_eq!(net.store().domain(i).values().collect::<Vec<_>>(), vec![0, 2, 4]);

    net.push_level();
    net.store_mut().assign(r, 4).unwrap();
    net.propagate().unwrap();
    assert_eq!(net.store().value(i), Some(2));
    net.pop_level();
    assert_eq!(net.store().domain(i).size(), 3);
}

#[test]
fn test_element_const_without_support_conflicts() {
    let mut net = ConstraintNetwork::new();
    let i = var(&mut net, 0, 2);
    let r = net.new_var(Domain::singleton(10));
    net.post(ElementConst::new(i, vec![1, 2, 3], r));
    assert_eq!(net.propagate(), Err(Conflict));
}

#[test]
fn test_element_var_channels_fixed_index() {
    let mut net = ConstraintNetwork::new();
    let a = var(&mut net, 0, 4);
    let b = var(&mut net, 5, 9);
    let i = var(&mut net, 0, 1);
    let r = var(&mut net, 6, 20);
    net.post(ElementVar::new(i, vec![a, b], r));
    net.propagate().unwrap();
    // a cannot reach 6
    assert_eq!(net.store().value(i), Some(1));
    assert_eq!(net.store().min(b), 6);
    assert_eq!(net.store().max(r), 9);
}

#[test]
fn test_element_var_fixed_result_uses_membership() {
    let mut net = ConstraintNetwork::new();
    let a = net.new_var(Domain::from_values([0, 2]));
    let b = net.new_var(Domain::from_values([1, 2]));
    let i = var(&mut net, 0, 1);
    let r = net.new_var(Domain::singleton(1));
    net.post(ElementVar::new(i, vec![a, b], r));
    net.propagate().unwrap();
    assert_eq!(net.store().value(i), Some(1));
    assert_eq!(net.store().value(b), Some(1));
}

#[test]
fn test_reified_ge_both_directions() {
    let mut net = ConstraintNetwork::new();
    let b = net.new_bool();
    let x = var(&mut net, 0, 5);
    net.post(ReifiedGe::new(b, x, 3));
    net.propagate().unwrap();
    assert!(!net.store().is_fixed(b));

    net.store_mut().assign(b, 0).unwrap();
    net.propagate().unwrap();
    assert_eq!(net.store().max(x), 2);
}

#[test]
fn test_reified_eq_detects_entailment() {
    let mut net = ConstraintNetwork::new();
    let b = net.new_bool();
    let x = var(&mut net, 0, 5);
    net.post(ReifiedEq::new(b, x, 2));
    net.store_mut().remove_value(x, 2).unwrap();
    net.propagate().unwrap();
    assert_eq!(net.store().value(b), Some(0));
}

#[test]
fn test_and_reif() {
    let mut net = ConstraintNetwork::new();
    let b = net.new_bool();
    let x = net.new_bool();
    let y = net.new_bool();
    net.post(AndReif::new(b, x, y));
    net.store_mut().assign(b, 0).unwrap();
    net.store_mut().assign(x, 1).unwrap();
    net.propagate().unwrap();
    assert_eq!(net.store().value(y), Some(0));
}

#[test]
fn test_all_different_value_elimination() {
    let mut net = ConstraintNetwork::new();
    let x = var(&mut net, 0, 2);
    let y = var(&mut net, 0, 2);
    let z = var(&mut net, 0, 2);
    net.post(AllDifferent::new(vec![x, y, z]));
    net.store_mut().assign(x, 1).unwrap();
    net.store_mut().assign(y, 0).unwrap();
    net.propagate().unwrap();
    assert_eq!(net.store().value(z), Some(2));
}

#[test]
fn test_all_different_hall_interval() {
    let mut net = ConstraintNetwork::new();
    let x = var(&mut net, 1, 2);
    let y = var(&mut net, 1, 2);
    let z = var(&mut net, 0, 3);
    net.post(AllDifferent::new(vec![x, y, z]));
    net.propagate().unwrap();
    assert_eq!(net.store().domain(z).values().collect::<Vec<_>>(), vec![0, 3]);
}

#[test]
fn test_all_different_pigeonhole() {
    let mut net = ConstraintNetwork::new();
    let vars: Vec<_> = (0..3).map(|_| var(&mut net, 0, 1)).collect();
    net.post(AllDifferent::new(vars));
    assert_eq!(net.propagate(), Err(Conflict));
}

#[test]
fn test_conditional_sum_counts() {
    let mut net = ConstraintNetwork::new();
    let one = net.new_var(Domain::singleton(1));
    let sels: Vec<_> = (0..3).map(|_| var(&mut net, 0, 2)).collect();
    let total = var(&mut net, 2, 2);
    net.post(ConditionalSum::new(sels.clone(), vec![one; 3], 1, total));

    net.store_mut().assign(sels[0], 0).unwrap();
    net.propagate().unwrap();
    // both remaining selectors are needed
    assert_eq!(net.store().value(sels[1]), Some(1));
    assert_eq!(net.store().value(sels[2]), Some(1));
}

#[test]
fn test_conditional_sum_excludes_heavy_items() {
    let mut net = ConstraintNetwork::new();
    let sel = var(&mut net, 0, 1);
    let w = var(&mut net, 5, 8);
    let total = var(&mut net, 0, 4);
    net.post(ConditionalSum::new(vec![sel], vec![w], 1, total));
    net.propagate().unwrap();
    assert_eq!(net.store().value(sel), Some(0));
    assert_eq!(net.store().value(total), Some(0));
}

#[test]
fn test_conditional_sum_bounds_weights() {
    let mut net = ConstraintNetwork::new();
    let a = net.new_var(Domain::singleton(0));
    let b = net.new_var(Domain::singleton(0));
    let wa = var(&mut net, 0, 10);
    let wb = var(&mut net, 0, 3);
    let total = var(&mut net, 9, 20);
    net.post(ConditionalSum::new(vec![a, b], vec![wa, wb], 0, total));
    net.propagate().unwrap();
    assert_eq!(net.store().min(wa), 6);
    assert_eq!(net.store().max(total), 13);
}

#[test]
fn test_horizon_cap_limits_pour() {
    let mut net = ConstraintNetwork::new();
    let poured = var(&mut net, 0, 100);
    let volume = net.new_var(Domain::singleton(10));
    let rate = net.new_var(Domain::singleton(2));
    let unload = net.new_var(Domain::singleton(17));
    net.post(HorizonCap::new(poured, volume, rate, unload, 20));
    net.propagate().unwrap();
    assert_eq!(net.store().value(poured), Some(6));
}

#[test]
fn test_horizon_cap_bounds_unload() {
    let mut net = ConstraintNetwork::new();
    let poured = var(&mut net, 6, 100);
    let volume = net.new_var(Domain::singleton(6));
    let rate = net.new_var(Domain::singleton(2));
    let unload = var(&mut net, 0, 20);
    net.post(HorizonCap::new(poured, volume, rate, unload, 20));
    net.propagate().unwrap();
    assert_eq!(net.store().max(unload), 17);
}

#[test]
fn test_horizon_cap_zero_rate_cannot_pour() {
    let mut net = ConstraintNetwork::new();
    let poured = var(&mut net, 1, 10);
    let volume = net.new_var(Domain::singleton(5));
    let rate = net.new_var(Domain::singleton(0));
    let unload = var(&mut net, 0, 20);
    net.post(HorizonCap::new(poured, volume, rate, unload, 20));
    assert_eq!(net.propagate(), Err(Conflict));
}

fn task(net: &mut ConstraintNetwork, lo: i64, hi: i64, dur: i64, present: bool) -> Task {
    Task {
        start: var(net, lo, hi),
        duration: net.new_var(Domain::singleton(dur)),
        presence: if present {
            net.new_var(Domain::singleton(1))
        } else {
            net.new_bool()
        },
    }
}

#[test]
fn test_disjunctive_detects_precedence() {
    let mut net = ConstraintNetwork::new();
    let a = task(&mut net, 0, 1, 3, true);
    let b = task(&mut net, 0, 10, 2, true);
    net.post(Disjunctive::new(vec![a, b]));
    net.propagate().unwrap();
    // b cannot go first without pushing a past its latest start
    assert_eq!(net.store().min(b.start), 3);
}

#[test]
fn test_disjunctive_overlap_fails() {
    let mut net = ConstraintNetwork::new();
    let a = task(&mut net, 2, 2, 3, true);
    let b = task(&mut net, 3, 3, 1, true);
    net.post(Disjunctive::new(vec![a, b]));
    assert_eq!(net.propagate(), Err(Conflict));
}

#[test]
fn test_disjunctive_edge_finding_pushes_task() {
    let mut net = ConstraintNetwork::new();
    // two tasks filling [0, 4), a third that could start at 1
    let a = task(&mut net, 0, 2, 2, true);
    let b = task(&mut net, 0, 2, 2, true);
    let c = task(&mut net, 1, 20, 2, true);
    net.post(Disjunctive::new(vec![a, b, c]));
    net.propagate().unwrap();
    assert_eq!(net.store().min(c.start), 4);
}

#[test]
fn test_disjunctive_overload() {
    let mut net = ConstraintNetwork::new();
    let a = task(&mut net, 0, 1, 2, true);
    let b = task(&mut net, 0, 1, 2, true);
    let c = task(&mut net, 0, 1, 2, true);
    net.post(Disjunctive::new(vec![a, b, c]));
    assert_eq!(net.propagate(), Err(Conflict));
}

#[test]
fn test_disjunctive_removes_blocked_optional_task() {
    let mut net = ConstraintNetwork::new();
    let fixed = task(&mut net, 4, 4, 4, true);
    let opt = task(&mut net, 5, 6, 1, false);
    net.post(Disjunctive::new(vec![fixed, opt]));
    net.propagate().unwrap();
    assert_eq!(net.store().value(opt.presence), Some(0));
}

#[test]
fn test_disjunctive_ignores_zero_duration() {
    let mut net = ConstraintNetwork::new();
    let a = task(&mut net, 3, 3, 0, true);
    let b = task(&mut net, 3, 3, 0, true);
    net.post(Disjunctive::new(vec![a, b]));
    assert!(net.propagate().is_ok());
}
