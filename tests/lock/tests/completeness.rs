//! Branching completeness lock tests.
//!
//! On small graphs the leaves of the full branching tree are exactly the
//! matchings of the graph: every matching is reached, once, as the included
//! set of a leaf whose remaining edges are all excluded.

use std::collections::BTreeSet;

use lock_tests::fixtures::{
    all_matchings, cycle4, hub_with_tail, leaf_assignment, path3, random_graph, reachable_states,
    star,
};
use matchbound_kernel::graph::ProblemGraphV1;
use matchbound_kernel::state::MatchingStateV1;

fn assert_leaves_are_all_matchings(graph: &ProblemGraphV1) {
    let root = MatchingStateV1::root(graph.clone());
    let leaves: Vec<Vec<usize>> = reachable_states(&root)
        .iter()
        .filter(|s| s.is_leaf())
        .map(leaf_assignment)
        .collect();
    let distinct: BTreeSet<Vec<usize>> = leaves.iter().cloned().collect();

    assert_eq!(distinct.len(), leaves.len(), "a matching was reached twice");
    assert_eq!(distinct, all_matchings(graph));
}

#[test]
fn leaves_enumerate_every_matching_up_to_four_edges() {
    for graph in [path3(), cycle4(), hub_with_tail(), star(4)] {
        assert!(graph.edge_count() <= 4);
        assert_leaves_are_all_matchings(&graph);
    }
}

#[test]
fn leaves_enumerate_every_matching_on_random_graphs() {
    for seed in 0..10 {
        let graph = random_graph(seed, 6, 0.4);
        if graph.edge_count() <= 10 {
            assert_leaves_are_all_matchings(&graph);
        }
    }
}

#[test]
fn path3_has_five_matchings() {
    // {}, {e0}, {e1}, {e2}, {e0, e2}
    let root = MatchingStateV1::root(path3());
    let leaves = reachable_states(&root)
        .into_iter()
        .filter(MatchingStateV1::is_leaf)
        .count();
    assert_eq!(leaves, 5);
}

#[test]
fn every_internal_state_has_exactly_two_children() {
    let root = MatchingStateV1::root(cycle4());
    for state in reachable_states(&root) {
        match state.branch() {
            Some([include, exclude]) => {
                let edge = state.next_free_edge().expect("internal state has a free edge");
                assert_eq!(include.decision().map(|d| (d.edge, d.include)), Some((edge, true)));
                assert_eq!(exclude.decision().map(|d| (d.edge, d.include)), Some((edge, false)));
                assert_eq!(include.depth(), state.depth() + 1);
                assert_ne!(include.fingerprint(), exclude.fingerprint());
            }
            None => assert!(state.is_leaf()),
        }
    }
}
