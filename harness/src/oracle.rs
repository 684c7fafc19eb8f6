//! Exhaustive maximum matching, for cross-checking small instances.

use matchbound_kernel::graph::ProblemGraphV1;
use matchbound_search::search::SearchResult;

/// Largest edge count the oracle accepts; the recursion is `O(2^m)`.
pub const ORACLE_MAX_EDGES: usize = 24;

/// Size of a maximum matching of `graph` by exhaustive recursion, or `None`
/// if the graph has more than [`ORACLE_MAX_EDGES`] edges.
///
/// Edges are taken in insertion order: each is either skipped or, if both
/// endpoints are still free, added.
#[must_use]
pub fn max_matching_size(graph: &ProblemGraphV1) -> Option<usize> {
    if graph.edge_count() > ORACLE_MAX_EDGES {
        return None;
    }
    let mut used = vec![false; graph.node_count() as usize];
    Some(best_from(graph, 0, &mut used))
}

/// Outcome of comparing a search result with [`max_matching_size`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleCheck {
    Agrees { size: usize },
    Mismatch { found: usize, expected: usize },
    /// The search stopped on its budget, or the graph is too large.
    Skipped,
}

/// Compare `result` with the oracle. Only an optimal result is comparable:
/// a budget-limited incumbent may legitimately fall short.
#[must_use]
pub fn check_result(graph: &ProblemGraphV1, result: &SearchResult) -> OracleCheck {
    if !result.is_optimal() {
        return OracleCheck::Skipped;
    }
    let (Some(best), Some(expected)) = (result.best_state(), max_matching_size(graph)) else {
        return OracleCheck::Skipped;
    };
    let found = best.matching_size();
    if found == expected {
        OracleCheck::Agrees { size: found }
    } else {
        OracleCheck::Mismatch { found, expected }
    }
}

fn best_from(graph: &ProblemGraphV1, next: usize, used: &mut [bool]) -> usize {
    let Some(edge) = graph.edges().get(next) else {
        return 0;
    };
    let skip = best_from(graph, next + 1, used);
    let (u, v) = (edge.u as usize, edge.v as usize);
    if used[u] || used[v] {
        return skip;
    }
    used[u] = true;
    used[v] = true;
    let take = 1 + best_from(graph, next + 1, used);
    used[u] = false;
    used[v] = false;
    skip.max(take)
}
