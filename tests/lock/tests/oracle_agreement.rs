//! Optimality lock tests against exhaustive enumeration on random graphs.

use lock_tests::fixtures::random_graph;
use matchbound_harness::oracle::max_matching_size;
use matchbound_kernel::state::MatchingStateV1;
use matchbound_search::observer::NoopObserver;
use matchbound_search::policy::{DedupPolicyV1, FrontierOrderV1, PruneRuleV1, SearchPolicyV1};
use matchbound_search::search::search;

fn policies() -> Vec<SearchPolicyV1> {
    let mut out = Vec::new();
    for frontier_order in [FrontierOrderV1::BestBound, FrontierOrderV1::Depth] {
        for dedup in [DedupPolicyV1::DecidedEdges, DedupPolicyV1::Disabled] {
            for prune_rule in [PruneRuleV1::CutTies, PruneRuleV1::KeepTies] {
                out.push(SearchPolicyV1 {
                    frontier_order,
                    dedup,
                    prune_rule,
                    ..SearchPolicyV1::default()
                });
            }
        }
    }
    out
}

#[test]
fn search_matches_oracle_on_random_graphs() {
    for seed in 0..25 {
        let graph = random_graph(seed, 8, 0.35);
        let expected = max_matching_size(&graph).expect("small enough for the oracle");

        for policy in policies() {
            let result = search(MatchingStateV1::root(graph.clone()), &policy, &mut NoopObserver)
                .expect("no caps configured");
            assert!(result.is_optimal());
            let best = result.best_state().unwrap();
            assert!(best.is_valid_matching());
            assert_eq!(
                best.matching_size(),
                expected,
                "seed {seed}, policy {:?}",
                policy
            );
        }
    }
}

#[test]
fn keep_ties_co_optima_are_all_maximum() {
    for seed in 0..10 {
        let graph = random_graph(seed, 7, 0.4);
        let expected = max_matching_size(&graph).unwrap();
        let policy = SearchPolicyV1 {
            prune_rule: PruneRuleV1::KeepTies,
            ..SearchPolicyV1::default()
        };
        let result = search(MatchingStateV1::root(graph), &policy, &mut NoopObserver).unwrap();
        for tie in &result.co_optimal {
            assert!(tie.state.is_leaf());
            assert!(tie.state.is_valid_matching());
            assert_eq!(tie.state.matching_size(), expected);
            assert_ne!(tie.fingerprint, result.best.as_ref().unwrap().fingerprint);
        }
    }
}

#[test]
fn best_bound_never_iterates_more_than_exhaustive_walk() {
    for seed in 0..10 {
        let graph = random_graph(seed, 8, 0.3);
        let m = graph.edge_count();
        let result = search(
            MatchingStateV1::root(graph),
            &SearchPolicyV1::default(),
            &mut NoopObserver,
        )
        .unwrap();
        // A full binary tree over m decisions has at most 2^(m+1) - 1 nodes.
        assert!(result.iterations() < 1u64 << (m + 1));
        assert_eq!(
            result.stats.nodes_created,
            1 + 2 * result.stats.expansions
        );
    }
}
