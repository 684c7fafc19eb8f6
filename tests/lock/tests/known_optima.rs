//! Optimality lock tests on instances with known maximum matchings.

use lock_tests::fixtures::{cycle4, double_square, hub_with_tail, path3, star};
use matchbound_kernel::build_state;
use matchbound_kernel::graph::ProblemGraphV1;
use matchbound_kernel::state::MatchingStateV1;
use matchbound_search::search::{run, TerminationReasonV1};

fn best_size(graph: ProblemGraphV1) -> usize {
    let result = run(build_state(graph)).expect("default policy never fails");
    assert!(result.is_optimal());
    result.best_state().expect("exhausted search has a leaf").matching_size()
}

#[test]
fn path3_returns_two_edge_matching_scored_two() {
    let result = run(build_state(path3())).unwrap();
    let best = result.best_state().unwrap();

    assert!(best.is_leaf());
    assert!(best.is_valid_matching());
    assert_eq!(best.matching_size(), 2);
    assert!((best.score() - 2.0).abs() < f64::EPSILON);
    assert_eq!(result.best_score(), Some(2.0));
    let pairs: Vec<(u32, u32)> = best.matching().iter().map(|e| (e.u, e.v)).collect();
    assert_eq!(pairs, vec![(0, 1), (2, 3)]);
}

#[test]
fn including_the_hub_edge_propagates() {
    let mut state = build_state(hub_with_tail());
    state.include(0);
    assert_eq!(state.included_edges().collect::<Vec<_>>(), vec![0]);
    assert_eq!(state.excluded_edges().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(state.free_edges().collect::<Vec<_>>(), vec![3]);
    assert!((state.score() - 2.0).abs() < f64::EPSILON);
}

#[test]
fn known_sizes() {
    assert_eq!(best_size(cycle4()), 2);
    assert_eq!(best_size(star(5)), 1);
    assert_eq!(best_size(hub_with_tail()), 2);
    assert_eq!(best_size(double_square()), 3);
    let k4 = ProblemGraphV1::new(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]).unwrap();
    assert_eq!(best_size(k4), 2);
}

#[test]
fn empty_graph_yields_empty_matching_after_one_leaf() {
    for node_count in [0, 1, 5] {
        let graph = ProblemGraphV1::new(node_count, &[]).unwrap();
        let result = run(MatchingStateV1::root(graph)).unwrap();
        let best = result.best_state().expect("root is a leaf");

        assert!(best.matching().is_empty());
        assert!(best.score().abs() < f64::EPSILON);
        assert_eq!(result.stats.leaves, 1);
        assert_eq!(result.iterations(), 1);
        assert_eq!(result.stats.expansions, 0);
        assert_eq!(result.termination, TerminationReasonV1::FrontierExhausted);
    }
}
