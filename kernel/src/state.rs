//! `MatchingStateV1`: one node of the branch-and-bound tree.
//!
//! A state pairs the shared [`ProblemGraphV1`] with a three-way partition of
//! its edges (free / included / excluded) kept as a single status vector.
//! Alongside it the state maintains, incrementally:
//!
//! - `live_degree[v]`: degree of `v` among not-excluded edges
//!   (`included ∪ free`),
//! - `covered`: number of nodes with `live_degree > 0` (the sum of node
//!   scores).
//!
//! The bound is `covered / 2`: any matching reachable from this state uses
//! two distinct covered nodes per edge. Both mutations only ever remove edges
//! from the not-excluded set, so the bound never increases along a branch.
//!
//! States are copy-and-mutate: [`MatchingStateV1::branch`] clones the parent
//! and applies exactly one decision to each child. Nothing mutates a state
//! after it has been fingerprinted.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::digest::hash::{canonical_hash, ContentHash};
use crate::digest::hash_domain::HashDomain;
use crate::graph::{Edge, EdgeId, NodeId, ProblemGraphV1};

/// Decision status of one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeStatus {
    Free,
    Included,
    Excluded,
}

impl EdgeStatus {
    /// Included or excluded, i.e. not free.
    #[must_use]
    pub fn is_decided(self) -> bool {
        !matches!(self, Self::Free)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Included => "included",
            Self::Excluded => "excluded",
        }
    }

    fn tag(self) -> u8 {
        match self {
            Self::Free => 0,
            Self::Included => 1,
            Self::Excluded => 2,
        }
    }
}

/// The branch decision that produced a state from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub edge: EdgeId,
    pub include: bool,
}

/// Typed failure for [`MatchingStateV1::from_statuses`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The status vector does not have one entry per edge.
    StatusCountMismatch { expected: usize, actual: usize },
    /// Two included edges share an endpoint.
    IncludedEdgesConflict { first: EdgeId, second: EdgeId },
    /// A free edge touches an included edge; propagation would have excluded it.
    UnpropagatedFreeEdge { free: EdgeId, included: EdgeId },
}

impl std::fmt::Display for StateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StatusCountMismatch { expected, actual } => {
                write!(f, "expected {expected} edge statuses, got {actual}")
            }
            Self::IncludedEdgesConflict { first, second } => {
                write!(f, "included edges {first} and {second} share an endpoint")
            }
            Self::UnpropagatedFreeEdge { free, included } => {
                write!(f, "free edge {free} touches included edge {included}")
            }
        }
    }
}

impl std::error::Error for StateError {}

/// A search state over a shared problem graph.
#[derive(Debug, Clone)]
pub struct MatchingStateV1 {
    graph: Arc<ProblemGraphV1>,
    status: Vec<EdgeStatus>,
    live_degree: Vec<u32>,
    covered: u32,
    free_count: usize,
    /// Every edge below this index is decided.
    cursor: EdgeId,
    depth: u32,
    decision: Option<Decision>,
}

impl MatchingStateV1 {
    /// The root state: every edge free, bound computed from full degrees.
    #[must_use]
    pub fn root(graph: impl Into<Arc<ProblemGraphV1>>) -> Self {
        let graph = graph.into();
        let statuses = vec![EdgeStatus::Free; graph.edge_count()];
        Self::assemble(graph, statuses)
    }

    /// Rebuild a state from an explicit partition.
    ///
    /// The result is treated as a fresh root (depth 0, no decision).
    ///
    /// # Errors
    ///
    /// Returns [`StateError`] if the partition is not one propagation could
    /// have produced: wrong length, included edges sharing an endpoint, or a
    /// free edge touching an included edge.
    pub fn from_statuses(
        graph: impl Into<Arc<ProblemGraphV1>>,
        statuses: Vec<EdgeStatus>,
    ) -> Result<Self, StateError> {
        let graph = graph.into();
        if statuses.len() != graph.edge_count() {
            return Err(StateError::StatusCountMismatch {
                expected: graph.edge_count(),
                actual: statuses.len(),
            });
        }

        let mut matched_by: Vec<Option<EdgeId>> = vec![None; graph.node_count() as usize];
        for (id, edge) in graph.edges().iter().enumerate() {
            if statuses[id] != EdgeStatus::Included {
                continue;
            }
            for node in edge.endpoints() {
                if let Some(first) = matched_by[node as usize] {
                    return Err(StateError::IncludedEdgesConflict { first, second: id });
                }
                matched_by[node as usize] = Some(id);
            }
        }
        for (id, edge) in graph.edges().iter().enumerate() {
            if statuses[id] != EdgeStatus::Free {
                continue;
            }
            if let Some(included) = edge
                .endpoints()
                .iter()
                .find_map(|&node| matched_by[node as usize])
            {
                return Err(StateError::UnpropagatedFreeEdge { free: id, included });
            }
        }

        Ok(Self::assemble(graph, statuses))
    }

    fn assemble(graph: Arc<ProblemGraphV1>, status: Vec<EdgeStatus>) -> Self {
        let mut live_degree = vec![0u32; graph.node_count() as usize];
        for (edge, s) in graph.edges().iter().zip(&status) {
            if *s != EdgeStatus::Excluded {
                live_degree[edge.u as usize] += 1;
                live_degree[edge.v as usize] += 1;
            }
        }
        let covered = live_degree.iter().map(|&d| u32::from(d > 0)).sum();
        let free_count = status.iter().filter(|s| !s.is_decided()).count();
        let cursor = status
            .iter()
            .position(|s| !s.is_decided())
            .unwrap_or(status.len());
        Self {
            graph,
            status,
            live_degree,
            covered,
            free_count,
            cursor,
            depth: 0,
            decision: None,
        }
    }

    /// Commit `edge` to the matching and exclude every other free edge that
    /// touches either endpoint.
    ///
    /// # Panics
    ///
    /// Panics if `edge` is not free. Including a decided edge is a search
    /// engine bug, never a recoverable condition.
    pub fn include(&mut self, edge: EdgeId) {
        assert!(
            self.status[edge] == EdgeStatus::Free,
            "include({edge}) on non-free edge (status: {})",
            self.status[edge].as_str()
        );
        self.status[edge] = EdgeStatus::Included;
        self.free_count -= 1;

        let graph = Arc::clone(&self.graph);
        for node in graph.edge(edge).endpoints() {
            for &other in graph.incident(node) {
                if other != edge {
                    self.exclude(other);
                }
            }
        }
    }

    /// Forbid `edge` from the matching.
    ///
    /// Returns `false` and leaves the state untouched if `edge` is not free.
    pub fn exclude(&mut self, edge: EdgeId) -> bool {
        if self.status[edge] != EdgeStatus::Free {
            return false;
        }
        self.status[edge] = EdgeStatus::Excluded;
        self.free_count -= 1;
        for node in self.graph.edge(edge).endpoints() {
            self.drop_live_edge(node);
        }
        true
    }

    fn drop_live_edge(&mut self, node: NodeId) {
        let degree = &mut self.live_degree[node as usize];
        *degree -= 1;
        if *degree == 0 {
            self.covered -= 1;
        }
    }

    /// The first free edge in enumeration order, if any.
    #[must_use]
    pub fn next_free_edge(&self) -> Option<EdgeId> {
        (self.cursor..self.status.len()).find(|&id| self.status[id] == EdgeStatus::Free)
    }

    /// Split on the first free edge: `[included child, excluded child]`.
    ///
    /// Returns `None` for a leaf (no free edges).
    #[must_use]
    pub fn branch(&self) -> Option<[Self; 2]> {
        let edge = self.next_free_edge()?;

        let mut with = self.child(edge, true);
        with.include(edge);
        let mut without = self.child(edge, false);
        without.exclude(edge);

        Some([with, without])
    }

    fn child(&self, edge: EdgeId, include: bool) -> Self {
        let mut child = self.clone();
        child.cursor = edge + 1;
        child.depth = self.depth + 1;
        child.decision = Some(Decision { edge, include });
        child
    }

    /// Upper bound on the matching size reachable from this state.
    #[must_use]
    pub fn score(&self) -> f64 {
        f64::from(self.covered) / 2.0
    }

    /// The bound in half-units (`2 * score`), i.e. the number of covered nodes.
    #[must_use]
    pub fn bound_units(&self) -> u32 {
        self.covered
    }

    /// 1 if `node` still has a not-excluded incident edge, else 0.
    #[must_use]
    pub fn node_score(&self, node: NodeId) -> u32 {
        u32::from(self.live_degree[node as usize] > 0)
    }

    /// Degree of `node` among not-excluded edges.
    #[must_use]
    pub fn live_degree(&self, node: NodeId) -> u32 {
        self.live_degree[node as usize]
    }

    #[must_use]
    pub fn graph(&self) -> &Arc<ProblemGraphV1> {
        &self.graph
    }

    #[must_use]
    pub fn status(&self, edge: EdgeId) -> EdgeStatus {
        self.status[edge]
    }

    #[must_use]
    pub fn is_decided(&self, edge: EdgeId) -> bool {
        self.status[edge].is_decided()
    }

    /// Per-edge statuses indexed by [`EdgeId`].
    #[must_use]
    pub fn edge_statuses(&self) -> &[EdgeStatus] {
        &self.status
    }

    fn ids_with(&self, wanted: EdgeStatus) -> impl Iterator<Item = EdgeId> + '_ {
        self.status
            .iter()
            .enumerate()
            .filter(move |(_, s)| **s == wanted)
            .map(|(id, _)| id)
    }

    pub fn included_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.ids_with(EdgeStatus::Included)
    }

    pub fn excluded_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.ids_with(EdgeStatus::Excluded)
    }

    pub fn free_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.ids_with(EdgeStatus::Free)
    }

    /// Included edges as endpoint pairs.
    #[must_use]
    pub fn matching(&self) -> Vec<Edge> {
        self.included_edges().map(|id| self.graph.edge(id)).collect()
    }

    #[must_use]
    pub fn matching_size(&self) -> usize {
        self.included_edges().count()
    }

    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free_count
    }

    /// No free edges remain.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.free_count == 0
    }

    /// Number of branch decisions from the root.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[must_use]
    pub fn decision(&self) -> Option<Decision> {
        self.decision
    }

    /// No two included edges share an endpoint.
    #[must_use]
    pub fn is_valid_matching(&self) -> bool {
        let mut used = vec![false; self.graph.node_count() as usize];
        for edge in self.matching() {
            for node in edge.endpoints() {
                if std::mem::replace(&mut used[node as usize], true) {
                    return false;
                }
            }
        }
        true
    }

    /// Canonical identity bytes: one status tag per edge, in edge order.
    #[must_use]
    pub fn identity_bytes(&self) -> Vec<u8> {
        self.status.iter().map(|s| s.tag()).collect()
    }

    /// Content hash of [`Self::identity_bytes`].
    ///
    /// Equal exactly when the included and excluded sets are equal.
    #[must_use]
    pub fn fingerprint(&self) -> ContentHash {
        canonical_hash(HashDomain::MatchingState, &self.identity_bytes())
    }
}

impl PartialEq for MatchingStateV1 {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.graph, &other.graph) || self.graph == other.graph)
            && self.status == other.status
    }
}

impl Eq for MatchingStateV1 {}

impl Hash for MatchingStateV1 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.status.hash(state);
    }
}
