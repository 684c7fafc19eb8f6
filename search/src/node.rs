//! Search node and frontier key types.

use matchbound_kernel::digest::hash::ContentHash;
use matchbound_kernel::state::MatchingStateV1;

use crate::policy::FrontierOrderV1;

/// A matching state wrapped with its search bookkeeping.
///
/// The fingerprint is computed once, after the state is fully propagated,
/// and the state is never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SearchNodeV1 {
    /// Monotonic node identifier (root = 0).
    pub node_id: u64,
    /// Parent node ID (`None` for root).
    pub parent_id: Option<u64>,
    /// The propagated state.
    pub state: MatchingStateV1,
    /// [`MatchingStateV1::fingerprint`] of `state`.
    pub fingerprint: ContentHash,
    /// Global counter for deterministic tie-breaking.
    pub creation_order: u64,
}

impl SearchNodeV1 {
    #[must_use]
    pub fn new(
        node_id: u64,
        parent_id: Option<u64>,
        state: MatchingStateV1,
        creation_order: u64,
    ) -> Self {
        let fingerprint = state.fingerprint();
        Self {
            node_id,
            parent_id,
            state,
            fingerprint,
            creation_order,
        }
    }

    #[must_use]
    pub fn depth(&self) -> u32 {
        self.state.depth()
    }

    #[must_use]
    pub fn bound_units(&self) -> u32 {
        self.state.bound_units()
    }
}

/// The frontier ordering key. Greater pops first.
///
/// `primary`/`secondary` are the bound and the depth, in the order the
/// [`FrontierOrderV1`] dictates. Remaining ties go to the older node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierKey {
    pub primary: u32,
    pub secondary: u32,
    pub creation_order: u64,
}

impl FrontierKey {
    #[must_use]
    pub fn for_node(node: &SearchNodeV1, order: FrontierOrderV1) -> Self {
        let (primary, secondary) = match order {
            FrontierOrderV1::BestBound => (node.bound_units(), node.depth()),
            FrontierOrderV1::Depth => (node.depth(), node.bound_units()),
        };
        Self {
            primary,
            secondary,
            creation_order: node.creation_order,
        }
    }
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.primary
            .cmp(&other.primary)
            .then(self.secondary.cmp(&other.secondary))
            .then(other.creation_order.cmp(&self.creation_order))
    }
}
