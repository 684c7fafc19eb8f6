//! Graph fixtures and exhaustive walks over the branching tree.

use std::collections::BTreeSet;

use matchbound_harness::gnp::{generate_gnp, seeded_rng};
use matchbound_kernel::graph::{NodeId, ProblemGraphV1};
use matchbound_kernel::state::{EdgeStatus, MatchingStateV1};

/// 4 nodes, 3 edges in a line: maximum matching 2.
#[must_use]
pub fn path3() -> ProblemGraphV1 {
    ProblemGraphV1::new(4, &[(0, 1), (1, 2), (2, 3)]).expect("valid path")
}

/// A single 4-cycle: two disjoint perfect matchings.
#[must_use]
pub fn cycle4() -> ProblemGraphV1 {
    ProblemGraphV1::new(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).expect("valid cycle")
}

/// Two 4-cycles sharing edge (2,3), plus a pendant edge.
#[must_use]
pub fn double_square() -> ProblemGraphV1 {
    ProblemGraphV1::new(
        7,
        &[(0, 1), (1, 2), (2, 3), (3, 0), (2, 4), (4, 5), (5, 3), (5, 6)],
    )
    .expect("valid graph")
}

/// Star with `leaves` spokes around node 0.
#[must_use]
pub fn star(leaves: NodeId) -> ProblemGraphV1 {
    let edges: Vec<(NodeId, NodeId)> = (1..=leaves).map(|v| (0, v)).collect();
    ProblemGraphV1::new(leaves + 1, &edges).expect("valid star")
}

/// Branching on (1,2) covers 2, 3 and 4 in one decision.
#[must_use]
pub fn hub_with_tail() -> ProblemGraphV1 {
    ProblemGraphV1::new(6, &[(1, 2), (2, 3), (2, 4), (4, 5)]).expect("valid graph")
}

/// Seeded G(n, p) sample.
#[must_use]
pub fn random_graph(seed: u64, n: NodeId, p: f64) -> ProblemGraphV1 {
    generate_gnp(&mut seeded_rng(Some(seed)), n, p).expect("valid probability")
}

/// Every state reachable from the root through `branch()`, root first, in
/// depth-first order (include child before exclude child).
#[must_use]
pub fn reachable_states(root: &MatchingStateV1) -> Vec<MatchingStateV1> {
    let mut out = Vec::new();
    let mut stack = vec![root.clone()];
    while let Some(state) = stack.pop() {
        if let Some([include, exclude]) = state.branch() {
            stack.push(exclude);
            stack.push(include);
        }
        out.push(state);
    }
    out
}

/// All subsets of the edge set that form a matching, as included-edge sets.
#[must_use]
pub fn all_matchings(graph: &ProblemGraphV1) -> BTreeSet<Vec<usize>> {
    let m = graph.edge_count();
    assert!(m < 20, "subset enumeration is only for small graphs");
    let mut out = BTreeSet::new();
    for mask in 0u32..(1 << m) {
        let chosen: Vec<usize> = (0..m).filter(|e| mask & (1 << e) != 0).collect();
        let mut seen = BTreeSet::new();
        let is_matching = chosen.iter().all(|&e| {
            let edge = graph.edge(e);
            seen.insert(edge.u) && seen.insert(edge.v)
        });
        if is_matching {
            out.insert(chosen);
        }
    }
    out
}

/// Included-edge set of a leaf, with its other edges checked as excluded.
#[must_use]
pub fn leaf_assignment(state: &MatchingStateV1) -> Vec<usize> {
    assert!(state.is_leaf());
    state
        .edge_statuses()
        .iter()
        .enumerate()
        .filter(|(_, s)| **s == EdgeStatus::Included)
        .map(|(e, _)| e)
        .collect()
}
