//! Deduplication lock tests.
//!
//! Dedup is inert under binary branching: every node carries a distinct
//! decided partition, so the visited check never fires on a real search
//! tree. These tests lock that switching it on or off leaves the incumbent
//! untouched. Suppression itself is covered by the frontier unit tests.

use lock_tests::fixtures::{cycle4, double_square, random_graph};
use matchbound_kernel::graph::ProblemGraphV1;
use matchbound_kernel::state::MatchingStateV1;
use matchbound_search::observer::NoopObserver;
use matchbound_search::policy::{DedupPolicyV1, FrontierOrderV1, PruneRuleV1, SearchPolicyV1};
use matchbound_search::search::{search, SearchResult};

fn solve(graph: &ProblemGraphV1, policy: &SearchPolicyV1) -> SearchResult {
    search(
        MatchingStateV1::root(graph.clone()),
        policy,
        &mut NoopObserver,
    )
    .expect("no caps configured")
}

fn assert_same_incumbent(graph: &ProblemGraphV1, base: &SearchPolicyV1) {
    let on = solve(
        graph,
        &SearchPolicyV1 {
            dedup: DedupPolicyV1::DecidedEdges,
            ..base.clone()
        },
    );
    let off = solve(
        graph,
        &SearchPolicyV1 {
            dedup: DedupPolicyV1::Disabled,
            ..base.clone()
        },
    );

    let on_best = on.best.as_ref().expect("exhausted search has a leaf");
    let off_best = off.best.as_ref().expect("exhausted search has a leaf");
    assert_eq!(on_best.fingerprint, off_best.fingerprint);
    assert_eq!(on_best.state.matching(), off_best.state.matching());
    assert!(on.iterations() <= off.iterations());
    assert_eq!(off.stats.duplicates_suppressed, 0);
}

#[test]
fn four_cycle_same_incumbent_with_and_without_dedup() {
    for order in [FrontierOrderV1::BestBound, FrontierOrderV1::Depth] {
        for prune_rule in [PruneRuleV1::CutTies, PruneRuleV1::KeepTies] {
            let base = SearchPolicyV1 {
                frontier_order: order,
                prune_rule,
                ..SearchPolicyV1::default()
            };
            assert_same_incumbent(&cycle4(), &base);
            assert_same_incumbent(&double_square(), &base);
        }
    }
}

#[test]
fn random_graphs_same_incumbent_with_and_without_dedup() {
    for seed in 0..8 {
        let graph = random_graph(seed, 8, 0.35);
        assert_same_incumbent(&graph, &SearchPolicyV1::default());
    }
}

#[test]
fn dedup_is_inert_under_binary_branching() {
    for graph in [cycle4(), double_square(), random_graph(3, 8, 0.35)] {
        let result = solve(&graph, &SearchPolicyV1::default());
        assert_eq!(result.stats.duplicates_suppressed, 0);
    }
}
