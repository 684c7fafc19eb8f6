//! `SearchTraceV1`: an observer that records the search as an audit log.
//!
//! The normative surface is the ordered event list plus the summary. It holds
//! no wall-clock data, so two runs of the same instance under the same policy
//! produce byte-identical canonical JSON.

use matchbound_kernel::digest::canon::{canonical_json_bytes, CanonError};
use matchbound_kernel::digest::hash::{canonical_hash, ContentHash};
use matchbound_kernel::digest::hash_domain::HashDomain;

use crate::node::SearchNodeV1;
use crate::observer::{FinishEvent, IterationEvent, SearchObserver};
use crate::search::TerminationReasonV1;

/// One recorded engine event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEventV1 {
    /// Popped node dropped by dedup.
    Duplicate { node_id: u64, fingerprint: String },
    /// Popped node that passed dedup.
    Pop {
        iteration: u64,
        node_id: u64,
        parent_id: Option<u64>,
        fingerprint: String,
        depth: u32,
        bound_units: u32,
        incumbent_units: Option<u32>,
    },
    /// Popped node cut against the incumbent.
    Prune { iteration: u64, node_id: u64 },
    /// Popped node split into children.
    Expand {
        iteration: u64,
        node_id: u64,
        edge: u64,
        children: Vec<u64>,
    },
    /// Popped node with no free edges.
    Leaf {
        iteration: u64,
        node_id: u64,
        matching_size: u64,
    },
    /// Incumbent replaced.
    Incumbent {
        node_id: u64,
        bound_units: u32,
        previous_units: Option<u32>,
    },
    /// Leaf tying the incumbent.
    CoOptimal { node_id: u64 },
}

/// Aggregate counters recorded at finish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceSummaryV1 {
    pub termination: TerminationReasonV1,
    pub iterations: u64,
    pub expansions: u64,
    pub leaves: u64,
    pub pruned: u64,
    pub duplicates_suppressed: u64,
    pub frontier_high_water: u64,
    pub best_node_id: Option<u64>,
    pub best_fingerprint: Option<String>,
}

/// The complete audit trail of one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTraceV1 {
    pub events: Vec<TraceEventV1>,
    pub summary: Option<TraceSummaryV1>,
}

impl SearchTraceV1 {
    /// Serialize to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content hash of the canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(HashDomain::SearchTrace, &bytes))
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "events": self.events.iter().map(event_to_json).collect::<Vec<_>>(),
            "summary": self.summary.as_ref().map(summary_to_json),
        })
    }

    /// Number of recorded pops that passed dedup.
    #[must_use]
    pub fn pop_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TraceEventV1::Pop { .. }))
            .count()
    }
}

/// Observer that builds a [`SearchTraceV1`].
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    trace: SearchTraceV1,
}

impl TraceRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn trace(&self) -> &SearchTraceV1 {
        &self.trace
    }

    #[must_use]
    pub fn into_trace(self) -> SearchTraceV1 {
        self.trace
    }
}

impl SearchObserver for TraceRecorder {
    fn on_duplicate(&mut self, node: &SearchNodeV1) {
        self.trace.events.push(TraceEventV1::Duplicate {
            node_id: node.node_id,
            fingerprint: node.fingerprint.hex_digest().to_string(),
        });
    }

    fn on_pop(&mut self, event: &IterationEvent<'_>) {
        self.trace.events.push(TraceEventV1::Pop {
            iteration: event.iteration,
            node_id: event.node.node_id,
            parent_id: event.node.parent_id,
            fingerprint: event.node.fingerprint.hex_digest().to_string(),
            depth: event.node.depth(),
            bound_units: event.node.bound_units(),
            incumbent_units: event.incumbent_units,
        });
    }

    fn on_prune(&mut self, event: &IterationEvent<'_>) {
        self.trace.events.push(TraceEventV1::Prune {
            iteration: event.iteration,
            node_id: event.node.node_id,
        });
    }

    fn on_expand(&mut self, event: &IterationEvent<'_>, children: &[SearchNodeV1]) {
        let edge = children
            .first()
            .and_then(|c| c.state.decision())
            .map_or(0, |d| d.edge as u64);
        self.trace.events.push(TraceEventV1::Expand {
            iteration: event.iteration,
            node_id: event.node.node_id,
            edge,
            children: children.iter().map(|c| c.node_id).collect(),
        });
    }

    fn on_leaf(&mut self, event: &IterationEvent<'_>) {
        self.trace.events.push(TraceEventV1::Leaf {
            iteration: event.iteration,
            node_id: event.node.node_id,
            matching_size: event.node.state.matching_size() as u64,
        });
    }

    fn on_incumbent(&mut self, node: &SearchNodeV1, previous: Option<u32>) {
        self.trace.events.push(TraceEventV1::Incumbent {
            node_id: node.node_id,
            bound_units: node.bound_units(),
            previous_units: previous,
        });
    }

    fn on_co_optimal(&mut self, node: &SearchNodeV1) {
        self.trace
            .events
            .push(TraceEventV1::CoOptimal { node_id: node.node_id });
    }

    fn on_finish(&mut self, event: &FinishEvent<'_>) {
        self.trace.summary = Some(TraceSummaryV1 {
            termination: event.termination,
            iterations: event.stats.iterations,
            expansions: event.stats.expansions,
            leaves: event.stats.leaves,
            pruned: event.stats.pruned,
            duplicates_suppressed: event.stats.duplicates_suppressed,
            frontier_high_water: event.stats.frontier_high_water,
            best_node_id: event.best.map(|n| n.node_id),
            best_fingerprint: event.best.map(|n| n.fingerprint.hex_digest().to_string()),
        });
    }
}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

fn event_to_json(e: &TraceEventV1) -> serde_json::Value {
    match e {
        TraceEventV1::Duplicate {
            node_id,
            fingerprint,
        } => serde_json::json!({
            "fingerprint": fingerprint,
            "node_id": node_id,
            "type": "duplicate",
        }),
        TraceEventV1::Pop {
            iteration,
            node_id,
            parent_id,
            fingerprint,
            depth,
            bound_units,
            incumbent_units,
        } => serde_json::json!({
            "bound_units": bound_units,
            "depth": depth,
            "fingerprint": fingerprint,
            "incumbent_units": incumbent_units,
            "iteration": iteration,
            "node_id": node_id,
            "parent_id": parent_id,
            "type": "pop",
        }),
        TraceEventV1::Prune { iteration, node_id } => serde_json::json!({
            "iteration": iteration,
            "node_id": node_id,
            "type": "prune",
        }),
        TraceEventV1::Expand {
            iteration,
            node_id,
            edge,
            children,
        } => serde_json::json!({
            "children": children,
            "edge": edge,
            "iteration": iteration,
            "node_id": node_id,
            "type": "expand",
        }),
        TraceEventV1::Leaf {
            iteration,
            node_id,
            matching_size,
        } => serde_json::json!({
            "iteration": iteration,
            "matching_size": matching_size,
            "node_id": node_id,
            "type": "leaf",
        }),
        TraceEventV1::Incumbent {
            node_id,
            bound_units,
            previous_units,
        } => serde_json::json!({
            "bound_units": bound_units,
            "node_id": node_id,
            "previous_units": previous_units,
            "type": "incumbent",
        }),
        TraceEventV1::CoOptimal { node_id } => serde_json::json!({
            "node_id": node_id,
            "type": "co_optimal",
        }),
    }
}

fn summary_to_json(s: &TraceSummaryV1) -> serde_json::Value {
    serde_json::json!({
        "best_fingerprint": s.best_fingerprint,
        "best_node_id": s.best_node_id,
        "duplicates_suppressed": s.duplicates_suppressed,
        "expansions": s.expansions,
        "frontier_high_water": s.frontier_high_water,
        "iterations": s.iterations,
        "leaves": s.leaves,
        "pruned": s.pruned,
        "termination": s.termination.as_str(),
    })
}
