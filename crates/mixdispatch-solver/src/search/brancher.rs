//! Variable and value selection.

use mixdispatch_config::VariableSelection;

use crate::fd::{Domain, Store, VarId};

/// Picks the next decision variable from prioritized groups.
///
/// Groups are scanned in order and the first one with an unfixed variable
/// supplies the decision. When every group is fixed, any remaining unfixed
/// variable of the store is chosen in index order so leaves are fully bound.
#[derive(Debug, Clone)]
pub struct Brancher {
    groups: Vec<Vec<VarId>>,
    selection: VariableSelection,
}

impl Brancher {
    pub fn new(groups: Vec<Vec<VarId>>, selection: VariableSelection) -> Self {
        Self { groups, selection }
    }

    pub fn selection(&self) -> VariableSelection {
        self.selection
    }

    /// Next variable to branch on, or `None` at a leaf.
    pub fn select(&self, store: &Store) -> Option<VarId> {
        self.groups
            .iter()
            .find_map(|group| self.pick(group, store))
            .or_else(|| {
                (0..store.num_vars())
                    .map(|i| VarId(i as u32))
                    .find(|&v| !store.is_fixed(v))
            })
    }

    fn pick(&self, vars: &[VarId], store: &Store) -> Option<VarId> {
        let mut unfixed = vars.iter().copied().filter(|&v| !store.is_fixed(v));
        match self.selection {
            VariableSelection::InputOrder => unfixed.next(),
            VariableSelection::MaxRegret => {
                let mut best: Option<(i64, VarId)> = None;
                for v in unfixed {
                    let r = regret(store.domain(v));
                    if best.map_or(true, |(b, _)| r > b) {
                        best = Some((r, v));
                    }
                }
                best.map(|(_, v)| v)
            }
            VariableSelection::SmallestDomain => {
                let mut best: Option<(u64, VarId)> = None;
                for v in unfixed {
                    let size = store.domain(v).size();
                    if best.map_or(true, |(b, _)| size < b) {
                        best = Some((size, v));
                    }
                }
                best.map(|(_, v)| v)
            }
        }
    }
}

/// Gap between the smallest and second-smallest value.
fn regret(domain: &Domain) -> i64 {
    let min = domain.min();
    domain.next_after(min).map_or(0, |next| next - min)
}
