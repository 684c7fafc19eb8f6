//! Binary that solves fixed seeded G(n,p) instances and prints
//! deterministic output lines for cross-process verification.
//!
//! Usage: `search_fixture`
//!
//! Output: key=value lines, one block per instance.

use matchbound_harness::gnp::{generate_gnp, seeded_rng};
use matchbound_harness::runner::run_instance;
use matchbound_search::observer::NoopObserver;
use matchbound_search::policy::SearchPolicyV1;

const INSTANCES: &[(&str, u64, u32, f64)] = &[("demo", 7, 7, 0.4), ("medium", 2024, 14, 0.25)];

fn main() {
    let policy = SearchPolicyV1::default();
    for &(name, seed, nodes, p) in INSTANCES {
        let graph =
            generate_gnp(&mut seeded_rng(Some(seed)), nodes, p).expect("valid probability");
        let outcome =
            run_instance(graph, &policy, &mut NoopObserver, true).expect("search run failed");
        let trace = outcome.trace.as_ref().expect("trace was requested");

        println!("[{name}]");
        println!("graph_digest={}", outcome.graph.digest().expect("graph digest"));
        println!("policy_digest={}", policy.digest().expect("policy digest"));
        println!("report_digest={}", outcome.report.digest);
        println!("trace_digest={}", trace.digest().expect("trace digest"));
        println!("edge_count={}", outcome.graph.edge_count());
        println!(
            "matching_size={}",
            outcome
                .result
                .best_state()
                .map_or(0, |s| s.matching_size())
        );
        println!("iterations={}", outcome.result.iterations());
        println!("termination={}", outcome.result.termination.as_str());
    }
}
