//! Best-first frontier with a visited-fingerprint set.
//!
//! Uses a `BTreeSet`-based visited set (not `HashSet`) so that any dump of it
//! iterates in a deterministic order.

use std::collections::{BTreeSet, BinaryHeap};

use crate::node::{FrontierKey, SearchNodeV1};
use crate::policy::FrontierOrderV1;

/// A frontier entry wrapping a node with its ordering key.
#[derive(Debug)]
struct FrontierEntry {
    key: FrontierKey,
    node: SearchNodeV1,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Best-first frontier manager.
///
/// Maintains:
/// - A `BinaryHeap` (max-heap on [`FrontierKey`]) for O(log n) pop of the
///   most promising node
/// - A `BTreeSet<String>` of visited fingerprint hex digests
///
/// Dedup happens at pop time: the same fingerprint may sit in the heap more
/// than once, and the engine discards every pop after the first.
pub struct BestFirstFrontier {
    order: FrontierOrderV1,
    heap: BinaryHeap<FrontierEntry>,
    visited: BTreeSet<String>,
    high_water: u64,
}

impl BestFirstFrontier {
    #[must_use]
    pub fn new(order: FrontierOrderV1) -> Self {
        Self {
            order,
            heap: BinaryHeap::new(),
            visited: BTreeSet::new(),
            high_water: 0,
        }
    }

    #[must_use]
    pub fn order(&self) -> FrontierOrderV1 {
        self.order
    }

    /// Push a node keyed under this frontier's ordering.
    pub fn push(&mut self, node: SearchNodeV1) {
        self.heap.push(FrontierEntry {
            key: FrontierKey::for_node(&node, self.order),
            node,
        });
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Pop the highest-keyed node with its key.
    #[must_use]
    pub fn pop(&mut self) -> Option<(FrontierKey, SearchNodeV1)> {
        self.heap.pop().map(|e| (e.key, e.node))
    }

    /// Record a fingerprint as visited.
    ///
    /// Returns `false` if it was already visited.
    pub fn mark_visited(&mut self, fingerprint_hex: &str) -> bool {
        self.visited.insert(fingerprint_hex.to_string())
    }

    #[must_use]
    pub fn is_visited(&self, fingerprint_hex: &str) -> bool {
        self.visited.contains(fingerprint_hex)
    }

    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}
