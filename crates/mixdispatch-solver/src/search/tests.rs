//! Tests for variable selection and the branch-and-bound loop.

use mixdispatch_config::VariableSelection;

use super::*;
use crate::fd::propagators::LinearLe;
use crate::fd::Domain;
use crate::termination::{NodeCountTermination, SolverTermination};

/// `minimize x + 2y` over a small network.
#[derive(Debug)]
struct Toy {
    net: ConstraintNetwork,
    x: VarId,
    y: VarId,
    cost: VarId,
}

impl Toy {
    /// `x + y >= at_least`, `x, y in 0..=5`.
    fn new(at_least: i64) -> Self {
        let mut net = ConstraintNetwork::new();
        let x = net.new_var(Domain::range(0, 5));
        let y = net.new_var(Domain::range(0, 5));
        let cost = net.new_var(Domain::range(0, 100));
        net.post(LinearLe::new(vec![(-1, x), (-1, y)], -at_least));
        for p in LinearLe::equality(vec![(1, x), (2, y), (-1, cost)], 0, None) {
            net.post(p);
        }
        Self { net, x, y, cost }
    }

    fn bnb(&self) -> BranchAndBound {
        BranchAndBound::new(Brancher::new(
            vec![vec![self.x, self.y]],
            VariableSelection::InputOrder,
        ))
    }
}

impl SearchSpace for Toy {
    fn network(&self) -> &ConstraintNetwork {
        &self.net
    }

    fn network_mut(&mut self) -> &mut ConstraintNetwork {
        &mut self.net
    }

    fn objective(&self) -> VarId {
        self.cost
    }
}

fn run(toy: &mut Toy, termination: &dyn Termination) -> (SearchStatus, Vec<(i64, i64, i64)>) {
    let mut scope = SearchScope::new();
    scope.start_search();
    let mut found = Vec::new();
    let status = toy.bnb().search(toy, &mut scope, termination, |t, _| {
        let s = t.net.store();
        found.push((s.min(t.x), s.min(t.y), s.min(t.cost)));
    });
    (status, found)
}

#[test]
fn test_branch_and_bound_finds_optimum() {
    let mut toy = Toy::new(3);
    let (status, found) = run(&mut toy, &SolverTermination);

    assert_eq!(status, SearchStatus::Optimal);
    assert_eq!(found.last(), Some(&(3, 0, 3)));
    assert!(found.windows(2).all(|w| w[1].2 < w[0].2));
    for &(x, y, cost) in &found {
        assert!(x + y >= 3);
        assert_eq!(cost, x + 2 * y);
    }
}

#[test]
fn test_truncated_search_unwinds_levels() {
    let mut toy = Toy::new(3);
    let (status, found) = run(&mut toy, &NodeCountTermination::new(2));

    assert_eq!(status, SearchStatus::Truncated);
    assert!(found.is_empty());
    let store = toy.net.store();
    assert_eq!(store.depth(), 0);
    assert_eq!(store.min(toy.x), 0);
    assert_eq!(store.max(toy.x), 5);
}

#[test]
fn test_infeasible_network_reports_no_solution() {
    let mut toy = Toy::new(11);
    let (status, found) = run(&mut toy, &SolverTermination);

    assert_eq!(status, SearchStatus::Infeasible);
    assert!(found.is_empty());
}

#[test]
fn test_node_limit_truncates() {
    let mut toy = Toy::new(3);
    let (status, found) = run(&mut toy, &NodeCountTermination::new(1));

    assert_eq!(status, SearchStatus::Truncated);
    assert!(found.is_empty());
    assert!(!status.is_proven());
}

#[test]
fn test_regret_prefers_widest_gap() {
    let mut net = ConstraintNetwork::new();
    let a = net.new_var(Domain::from_values([0, 1, 2]));
    let b = net.new_var(Domain::from_values([0, 5]));
    let c = net.new_var(Domain::from_values([3, 8]));

    let brancher = Brancher::new(vec![vec![a, b, c]], VariableSelection::MaxRegret);
    // b and c tie on regret 5; the earlier one wins
    assert_eq!(brancher.select(net.store()), Some(b));
}

#[test]
fn test_smallest_domain_and_input_order() {
    let mut net = ConstraintNetwork::new();
    let a = net.new_var(Domain::range(0, 9));
    let b = net.new_var(Domain::range(0, 2));

    let smallest = Brancher::new(vec![vec![a, b]], VariableSelection::SmallestDomain);
    assert_eq!(smallest.select(net.store()), Some(b));
    let input = Brancher::new(vec![vec![a, b]], VariableSelection::InputOrder);
    assert_eq!(input.select(net.store()), Some(a));
}

#[test]
fn test_groups_take_priority_then_auxiliary() {
    let mut net = ConstraintNetwork::new();
    let aux = net.new_var(Domain::range(0, 3));
    let first = net.new_var(Domain::singleton(1));
    let second = net.new_var(Domain::range(0, 1));

    let brancher = Brancher::new(vec![vec![first], vec![second]], VariableSelection::MaxRegret);
    assert_eq!(brancher.select(net.store()), Some(second));

    net.store_mut().assign(second, 0).unwrap();
    assert_eq!(brancher.select(net.store()), Some(aux));

    net.store_mut().assign(aux, 2).unwrap();
    assert_eq!(brancher.select(net.store()), None);
}
