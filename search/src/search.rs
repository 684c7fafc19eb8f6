//! Search entry point and the branch-and-bound loop.
//!
//! ```text
//! push(root)
//! loop:
//!   pop best ─► duplicate? ─► drop
//!            ─► bound cut by incumbent? ─► prune
//!            ─► branch() = None ─► leaf: maybe new incumbent
//!            ─► branch() = [include, exclude] ─► push both
//! until frontier is empty (or the iteration budget runs out)
//! ```

use std::time::{Duration, Instant};

use matchbound_kernel::state::MatchingStateV1;

use crate::error::SearchError;
use crate::frontier::BestFirstFrontier;
use crate::node::SearchNodeV1;
use crate::observer::{FinishEvent, IterationEvent, NoopObserver, SearchObserver};
use crate::policy::{DedupPolicyV1, PruneRuleV1, SearchPolicyV1};

/// Why the search loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    /// Every state was expanded, pruned, or finalized: the incumbent is optimal.
    FrontierExhausted,
    /// `max_iterations` was reached with states still pending.
    IterationBudgetExceeded,
}

impl TerminationReasonV1 {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FrontierExhausted => "frontier_exhausted",
            Self::IterationBudgetExceeded => "iteration_budget_exceeded",
        }
    }
}

/// Execution statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatsV1 {
    /// Pops that passed dedup.
    pub iterations: u64,
    /// Iterations that produced children.
    pub expansions: u64,
    /// Iterations that reached a leaf.
    pub leaves: u64,
    /// Iterations cut against the incumbent.
    pub pruned: u64,
    /// Pops dropped because their fingerprint was already visited.
    pub duplicates_suppressed: u64,
    /// Nodes created, root included.
    pub nodes_created: u64,
    pub frontier_high_water: u64,
    pub elapsed: Duration,
}

/// Result of a search execution.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best leaf found. Absent only if the iteration budget ran out
    /// before any leaf was reached; a graph without edges yields the root
    /// itself (an empty matching).
    pub best: Option<SearchNodeV1>,
    /// Leaves tying `best` (collected only under [`PruneRuleV1::KeepTies`]).
    pub co_optimal: Vec<SearchNodeV1>,
    pub stats: SearchStatsV1,
    pub termination: TerminationReasonV1,
}

impl SearchResult {
    #[must_use]
    pub fn best_state(&self) -> Option<&MatchingStateV1> {
        self.best.as_ref().map(|n| &n.state)
    }

    /// Size of the best matching, as the state's score.
    #[must_use]
    pub fn best_score(&self) -> Option<f64> {
        self.best_state().map(MatchingStateV1::score)
    }

    #[must_use]
    pub fn iterations(&self) -> u64 {
        self.stats.iterations
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.stats.elapsed
    }

    /// `true` when the frontier was exhausted, so `best` is a maximum matching.
    #[must_use]
    pub fn is_optimal(&self) -> bool {
        self.termination == TerminationReasonV1::FrontierExhausted && self.best.is_some()
    }
}

/// Run the search with [`SearchPolicyV1::default`] and no observer.
///
/// # Errors
///
/// See [`search`]; the default policy has no frontier cap, so in practice
/// this does not fail.
pub fn run(root: MatchingStateV1) -> Result<SearchResult, SearchError> {
    search(root, &SearchPolicyV1::default(), &mut NoopObserver)
}

/// Run best-first branch-and-bound from `root`.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] before any work if the policy is
/// rejected, and [`SearchError::FrontierLimitExceeded`] if the frontier grows
/// past `max_frontier_size`.
pub fn search(
    root: MatchingStateV1,
    policy: &SearchPolicyV1,
    observer: &mut dyn SearchObserver,
) -> Result<SearchResult, SearchError> {
    policy.validate()?;
    let started = Instant::now();

    let mut frontier = BestFirstFrontier::new(policy.frontier_order);
    let mut stats = SearchStatsV1::default();
    let mut incumbent: Option<SearchNodeV1> = None;
    let mut co_optimal: Vec<SearchNodeV1> = Vec::new();
    let mut next_node_id: u64 = 0;

    frontier.push(SearchNodeV1::new(next_node_id, None, root, next_node_id));
    next_node_id += 1;

    let termination = loop {
        let Some((_, node)) = frontier.pop() else {
            break TerminationReasonV1::FrontierExhausted;
        };

        if policy.dedup == DedupPolicyV1::DecidedEdges
            && !frontier.mark_visited(node.fingerprint.hex_digest())
        {
            stats.duplicates_suppressed += 1;
            observer.on_duplicate(&node);
            continue;
        }
        stats.iterations += 1;

        let incumbent_units = incumbent.as_ref().map(SearchNodeV1::bound_units);
        let event = IterationEvent {
            iteration: stats.iterations,
            node: &node,
            incumbent_units,
            frontier_len: frontier.len(),
        };
        observer.on_pop(&event);

        let cut = incumbent_units
            .is_some_and(|best| policy.prune_rule.prunes(node.bound_units(), best));
        if cut {
            stats.pruned += 1;
            observer.on_prune(&event);
        } else if let Some(children) = node.state.branch() {
            stats.expansions += 1;
            let children: Vec<SearchNodeV1> = children
                .into_iter()
                .map(|state| {
                    let child =
                        SearchNodeV1::new(next_node_id, Some(node.node_id), state, next_node_id);
                    next_node_id += 1;
                    child
                })
                .collect();
            observer.on_expand(&event, &children);
            for child in children {
                frontier.push(child);
            }
            if let Some(limit) = policy.max_frontier_size {
                if frontier.len() as u64 > limit {
                    return Err(SearchError::FrontierLimitExceeded {
                        limit,
                        iterations: stats.iterations,
                    });
                }
            }
        } else {
            stats.leaves += 1;
            observer.on_leaf(&event);
            match incumbent_units {
                Some(best) if node.bound_units() < best => {}
                Some(best) if node.bound_units() == best => {
                    if policy.prune_rule == PruneRuleV1::KeepTies {
                        observer.on_co_optimal(&node);
                        co_optimal.push(node);
                    }
                }
                previous => {
                    observer.on_incumbent(&node, previous);
                    co_optimal.clear();
                    incumbent = Some(node);
                }
            }
        }

        if policy
            .max_iterations
            .is_some_and(|max| stats.iterations >= max)
            && !frontier.is_empty()
        {
            break TerminationReasonV1::IterationBudgetExceeded;
        }
    };

    stats.nodes_created = next_node_id;
    stats.frontier_high_water = frontier.high_water();
    stats.elapsed = started.elapsed();

    observer.on_finish(&FinishEvent {
        termination,
        stats: &stats,
        best: incumbent.as_ref(),
    });

    Ok(SearchResult {
        best: incumbent,
        co_optimal,
        stats,
        termination,
    })
}
