//! Shared helpers for matchbound benchmark suites.

use matchbound_harness::gnp::{generate_gnp, seeded_rng};
use matchbound_kernel::graph::ProblemGraphV1;
use matchbound_kernel::state::MatchingStateV1;
use matchbound_search::observer::NoopObserver;
use matchbound_search::policy::{FrontierOrderV1, PruneRuleV1, SearchPolicyV1};
use matchbound_search::search::{search, SearchResult};

/// A named instance plus the policy it is solved under.
pub struct Regime {
    pub name: &'static str,
    pub graph: ProblemGraphV1,
    pub policy: SearchPolicyV1,
}

/// Seeded G(n, p) sample.
///
/// # Panics
///
/// Panics if `p` is outside `[0, 1]`. Benchmark setup failures are fatal.
#[must_use]
pub fn gnp_instance(seed: u64, n: u32, p: f64) -> ProblemGraphV1 {
    generate_gnp(&mut seeded_rng(Some(seed)), n, p).expect("valid probability")
}

/// The fixed regimes the macro suite runs.
#[must_use]
pub fn regimes() -> Vec<Regime> {
    vec![
        Regime {
            name: "demo_n7",
            graph: gnp_instance(7, 7, 0.4),
            policy: SearchPolicyV1::default(),
        },
        Regime {
            name: "sparse_n24",
            graph: gnp_instance(1, 24, 0.08),
            policy: SearchPolicyV1::default(),
        },
        Regime {
            name: "dense_n10",
            graph: gnp_instance(2, 10, 0.5),
            policy: SearchPolicyV1::default(),
        },
        Regime {
            name: "depth_order_n10",
            graph: gnp_instance(2, 10, 0.5),
            policy: SearchPolicyV1 {
                frontier_order: FrontierOrderV1::Depth,
                ..SearchPolicyV1::default()
            },
        },
        Regime {
            name: "keep_ties_n8",
            graph: gnp_instance(3, 8, 0.4),
            policy: SearchPolicyV1 {
                prune_rule: PruneRuleV1::KeepTies,
                ..SearchPolicyV1::default()
            },
        },
    ]
}

/// Run only the engine on a regime, with no observer.
///
/// # Panics
///
/// Panics if the regime's policy is rejected.
#[must_use]
pub fn run_search_only(regime: &Regime) -> SearchResult {
    search(
        MatchingStateV1::root(regime.graph.clone()),
        &regime.policy,
        &mut NoopObserver,
    )
    .expect("regime policies carry no caps")
}
