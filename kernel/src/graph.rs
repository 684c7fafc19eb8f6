//! `ProblemGraphV1`: the static, undirected, simple graph a search runs over.
//!
//! Nodes are dense indices `0..node_count`. Edges are stored canonically as
//! `(min, max)` in insertion order; an [`EdgeId`] is the position in that
//! order, and that order is the fixed enumeration order branching uses.

use std::collections::BTreeSet;

use crate::digest::canon::{canonical_json_bytes, CanonError};
use crate::digest::hash::{canonical_hash, ContentHash};
use crate::digest::hash_domain::HashDomain;

/// Dense node index.
pub type NodeId = u32;

/// Position of an edge in the graph's edge list.
pub type EdgeId = usize;

/// An undirected edge with `u < v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub u: NodeId,
    pub v: NodeId,
}

impl Edge {
    /// The endpoint opposite to `node`. `node` must be an endpoint.
    #[must_use]
    pub fn other(&self, node: NodeId) -> NodeId {
        debug_assert!(node == self.u || node == self.v);
        if node == self.u {
            self.v
        } else {
            self.u
        }
    }

    /// Whether the two edges share an endpoint.
    #[must_use]
    pub fn touches(&self, other: &Edge) -> bool {
        self.u == other.u || self.u == other.v || self.v == other.u || self.v == other.v
    }

    #[must_use]
    pub fn endpoints(&self) -> [NodeId; 2] {
        [self.u, self.v]
    }
}

/// Typed failure for graph construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An endpoint is not below `node_count`.
    NodeOutOfRange { node: NodeId, node_count: u32 },
    /// `u == v`.
    SelfLoop { node: NodeId },
    /// The same unordered pair was given twice.
    DuplicateEdge { u: NodeId, v: NodeId },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodeOutOfRange { node, node_count } => {
                write!(f, "node {node} out of range (node_count={node_count})")
            }
            Self::SelfLoop { node } => write!(f, "self-loop on node {node}"),
            Self::DuplicateEdge { u, v } => write!(f, "duplicate edge {{{u}, {v}}}"),
        }
    }
}

impl std::error::Error for GraphError {}

/// A static undirected simple graph.
///
/// Never mutated after construction; states share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemGraphV1 {
    node_count: u32,
    edges: Vec<Edge>,
    incidence: Vec<Vec<EdgeId>>,
}

impl ProblemGraphV1 {
    /// Build a graph on `node_count` nodes from an edge list.
    ///
    /// Edge orientation is normalized; insertion order is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] on out-of-range endpoints, self-loops, or
    /// duplicate edges.
    pub fn new(node_count: u32, edges: &[(NodeId, NodeId)]) -> Result<Self, GraphError> {
        let mut seen = BTreeSet::new();
        let mut canonical = Vec::with_capacity(edges.len());
        let mut incidence = vec![Vec::new(); node_count as usize];

        for &(a, b) in edges {
            for node in [a, b] {
                if node >= node_count {
                    return Err(GraphError::NodeOutOfRange { node, node_count });
                }
            }
            if a == b {
                return Err(GraphError::SelfLoop { node: a });
            }
            let edge = Edge {
                u: a.min(b),
                v: a.max(b),
            };
            if !seen.insert(edge) {
                return Err(GraphError::DuplicateEdge {
                    u: edge.u,
                    v: edge.v,
                });
            }
            let id = canonical.len();
            incidence[edge.u as usize].push(id);
            incidence[edge.v as usize].push(id);
            canonical.push(edge);
        }

        Ok(Self {
            node_count,
            edges: canonical,
            incidence,
        })
    }

    /// Build a graph whose node set is exactly `0..=max endpoint`.
    ///
    /// # Errors
    ///
    /// Same as [`ProblemGraphV1::new`]. An endpoint of `u32::MAX` is reported
    /// as [`GraphError::NodeOutOfRange`], since `node_count` would not fit.
    pub fn from_edges(edges: &[(NodeId, NodeId)]) -> Result<Self, GraphError> {
        let mut node_count = 0;
        for &(a, b) in edges {
            let top = a.max(b);
            let needed = top.checked_add(1).ok_or(GraphError::NodeOutOfRange {
                node: top,
                node_count: NodeId::MAX,
            })?;
            node_count = node_count.max(needed);
        }
        Self::new(node_count, edges)
    }

    #[must_use]
    pub fn node_count(&self) -> u32 {
        self.node_count
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All edges in enumeration order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// # Panics
    ///
    /// Panics if `id` is not a valid edge id.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Edge {
        self.edges[id]
    }

    /// Ids of the edges incident to `node`, in enumeration order.
    #[must_use]
    pub fn incident(&self, node: NodeId) -> &[EdgeId] {
        &self.incidence[node as usize]
    }

    #[must_use]
    pub fn degree(&self, node: NodeId) -> usize {
        self.incidence[node as usize].len()
    }

    /// Look up an edge id by its endpoints (either orientation).
    #[must_use]
    pub fn find_edge(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        if a >= self.node_count || b >= self.node_count {
            return None;
        }
        let target = Edge {
            u: a.min(b),
            v: a.max(b),
        };
        self.incidence[a as usize]
            .iter()
            .copied()
            .find(|&id| self.edges[id] == target)
    }

    /// Canonical JSON form: `{"edges": [[u, v], ...], "node_count": n}`.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "edges": self.edges.iter().map(|e| [e.u, e.v]).collect::<Vec<_>>(),
            "node_count": self.node_count,
        })
    }

    /// Content hash of the canonical JSON form.
    ///
    /// # Errors
    ///
    /// Propagates [`CanonError`] (cannot occur for integer-only content).
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(HashDomain::ProblemGraph, &bytes))
    }
}
