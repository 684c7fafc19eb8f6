//! Search policy types.

use matchbound_kernel::digest::canon::{canonical_json_bytes, CanonError};
use matchbound_kernel::digest::hash::{canonical_hash, ContentHash};
use matchbound_kernel::digest::hash_domain::HashDomain;

use crate::error::SearchError;

/// Engine configuration: ordering, dedup, pruning, and resource caps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicyV1 {
    /// Frontier ordering discipline. One per run, never mixed.
    pub frontier_order: FrontierOrderV1,
    /// Whether popped states are checked against the visited fingerprints.
    pub dedup: DedupPolicyV1,
    /// Whether states whose bound ties the incumbent are cut.
    pub prune_rule: PruneRuleV1,
    /// Stop after this many iterations (visited pops). `None` = unbounded.
    pub max_iterations: Option<u64>,
    /// Fail once the frontier holds more than this many states. `None` = unbounded.
    pub max_frontier_size: Option<u64>,
}

impl SearchPolicyV1 {
    /// Reject caps the engine cannot honor.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for a zero iteration budget or
    /// a zero frontier cap (the root alone would violate it).
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_iterations == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_iterations must be at least 1".into(),
            });
        }
        if self.max_frontier_size == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_frontier_size must be at least 1".into(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "dedup": self.dedup.as_str(),
            "frontier_order": self.frontier_order.as_str(),
            "max_frontier_size": self.max_frontier_size,
            "max_iterations": self.max_iterations,
            "prune_rule": self.prune_rule.as_str(),
        })
    }

    /// Content hash of the canonical JSON form.
    ///
    /// # Errors
    ///
    /// Propagates [`CanonError`] (cannot occur for integer-only content).
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(HashDomain::SearchPolicy, &bytes))
    }
}

impl Default for SearchPolicyV1 {
    fn default() -> Self {
        Self {
            frontier_order: FrontierOrderV1::BestBound,
            dedup: DedupPolicyV1::DecidedEdges,
            prune_rule: PruneRuleV1::CutTies,
            max_iterations: None,
            max_frontier_size: None,
        }
    }
}

/// Which key the frontier pops by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierOrderV1 {
    /// Highest bound first; ties go to the deeper, then the older state.
    BestBound,
    /// Deepest state first; ties go to the higher bound, then the older state.
    Depth,
}

impl FrontierOrderV1 {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BestBound => "best_bound",
            Self::Depth => "depth",
        }
    }
}

/// Dedup key policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupPolicyV1 {
    /// Skip a popped state whose decided-edge fingerprint was already visited.
    DecidedEdges,
    /// Expand every popped state.
    Disabled,
}

impl DedupPolicyV1 {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DecidedEdges => "decided_edges",
            Self::Disabled => "disabled",
        }
    }
}

/// Prune comparison against the incumbent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneRuleV1 {
    /// Cut when `bound <= incumbent`. A tie cannot improve the incumbent.
    CutTies,
    /// Cut only when `bound < incumbent`; leaves tying the incumbent are
    /// collected as co-optimal matchings.
    KeepTies,
}

impl PruneRuleV1 {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CutTies => "cut_ties",
            Self::KeepTies => "keep_ties",
        }
    }

    /// Whether a state with `bound` half-units is cut against an incumbent
    /// of `incumbent` half-units.
    #[must_use]
    pub fn prunes(self, bound: u32, incumbent: u32) -> bool {
        match self {
            Self::CutTies => bound <= incumbent,
            Self::KeepTies => bound < incumbent,
        }
    }
}
