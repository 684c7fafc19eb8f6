//! Observer hooks: the engine's only outward channel besides its result.
//!
//! The engine never logs on its own. Callers pass a [`SearchObserver`]; every
//! hook has a no-op default so an observer implements only what it needs.

use log::{debug, info, trace};

use crate::node::SearchNodeV1;
use crate::search::{SearchStatsV1, TerminationReasonV1};

/// Snapshot handed to per-iteration hooks.
#[derive(Debug, Clone, Copy)]
pub struct IterationEvent<'a> {
    /// 1-based count of visited pops.
    pub iteration: u64,
    /// The popped node.
    pub node: &'a SearchNodeV1,
    /// Incumbent bound in half-units at the time of the pop.
    pub incumbent_units: Option<u32>,
    /// Frontier size after the pop.
    pub frontier_len: usize,
}

impl IterationEvent<'_> {
    #[must_use]
    pub fn bound(&self) -> f64 {
        self.node.state.score()
    }

    #[must_use]
    pub fn incumbent_score(&self) -> Option<f64> {
        self.incumbent_units.map(|u| f64::from(u) / 2.0)
    }
}

/// Snapshot handed to [`SearchObserver::on_finish`].
#[derive(Debug, Clone, Copy)]
pub struct FinishEvent<'a> {
    pub termination: TerminationReasonV1,
    pub stats: &'a SearchStatsV1,
    pub best: Option<&'a SearchNodeV1>,
}

/// Subscriber for search progress.
pub trait SearchObserver {
    /// A popped node whose fingerprint was already visited.
    fn on_duplicate(&mut self, _node: &SearchNodeV1) {}

    /// A popped node that passed dedup, before the prune check.
    fn on_pop(&mut self, _event: &IterationEvent<'_>) {}

    /// The popped node was cut against the incumbent.
    fn on_prune(&mut self, _event: &IterationEvent<'_>) {}

    /// The popped node was split; `children` are about to enter the frontier.
    fn on_expand(&mut self, _event: &IterationEvent<'_>, _children: &[SearchNodeV1]) {}

    /// The popped node has no free edges.
    fn on_leaf(&mut self, _event: &IterationEvent<'_>) {}

    /// `node` replaced an incumbent of `previous` half-units (or none).
    fn on_incumbent(&mut self, _node: &SearchNodeV1, _previous: Option<u32>) {}

    /// `node` is a leaf tying the incumbent (only under `KeepTies`).
    fn on_co_optimal(&mut self, _node: &SearchNodeV1) {}

    /// The search loop ended.
    fn on_finish(&mut self, _event: &FinishEvent<'_>) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Observer that forwards events to the `log` facade.
///
/// Per-iteration events go to `debug`/`trace`, incumbent changes and the
/// final summary to `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl SearchObserver for LogObserver {
    fn on_duplicate(&mut self, node: &SearchNodeV1) {
        trace!("node {} duplicate {}", node.node_id, node.fingerprint.short());
    }

    fn on_pop(&mut self, event: &IterationEvent<'_>) {
        debug!(
            "iter {} node {} fp {} depth {} bound {} incumbent {:?} frontier {}",
            event.iteration,
            event.node.node_id,
            event.node.fingerprint.short(),
            event.node.depth(),
            event.bound(),
            event.incumbent_score(),
            event.frontier_len
        );
    }

    fn on_prune(&mut self, event: &IterationEvent<'_>) {
        trace!("iter {} pruned node {}", event.iteration, event.node.node_id);
    }

    fn on_leaf(&mut self, event: &IterationEvent<'_>) {
        debug!(
            "at leaf, local best = {}, global = {:?}",
            event.bound(),
            event.incumbent_score()
        );
    }

    fn on_incumbent(&mut self, node: &SearchNodeV1, previous: Option<u32>) {
        info!(
            "incumbent {} -> {} (node {}, fp {})",
            previous.map_or_else(|| "none".to_string(), |u| (f64::from(u) / 2.0).to_string()),
            node.state.score(),
            node.node_id,
            node.fingerprint.short()
        );
    }

    fn on_finish(&mut self, event: &FinishEvent<'_>) {
        info!(
            "search finished ({}): best {:?} after {} iterations in {:?}",
            event.termination.as_str(),
            event.best.map(|n| n.state.score()),
            event.stats.iterations,
            event.stats.elapsed
        );
    }
}

/// Fan events out to two observers, first `A` then `B`.
impl<A: SearchObserver, B: SearchObserver> SearchObserver for (A, B) {
    fn on_duplicate(&mut self, node: &SearchNodeV1) {
        self.0.on_duplicate(node);
        self.1.on_duplicate(node);
    }

    fn on_pop(&mut self, event: &IterationEvent<'_>) {
        self.0.on_pop(event);
        self.1.on_pop(event);
    }

    fn on_prune(&mut self, event: &IterationEvent<'_>) {
        self.0.on_prune(event);
        self.1.on_prune(event);
    }

    fn on_expand(&mut self, event: &IterationEvent<'_>, children: &[SearchNodeV1]) {
        self.0.on_expand(event, children);
        self.1.on_expand(event, children);
    }

    fn on_leaf(&mut self, event: &IterationEvent<'_>) {
        self.0.on_leaf(event);
        self.1.on_leaf(event);
    }

    fn on_incumbent(&mut self, node: &SearchNodeV1, previous: Option<u32>) {
        self.0.on_incumbent(node, previous);
        self.1.on_incumbent(node, previous);
    }

    fn on_co_optimal(&mut self, node: &SearchNodeV1) {
        self.0.on_co_optimal(node);
        self.1.on_co_optimal(node);
    }

    fn on_finish(&mut self, event: &FinishEvent<'_>) {
        self.0.on_finish(event);
        self.1.on_finish(event);
    }
}

impl<T: SearchObserver + ?Sized> SearchObserver for &mut T {
    fn on_duplicate(&mut self, node: &SearchNodeV1) {
        (**self).on_duplicate(node);
    }

    fn on_pop(&mut self, event: &IterationEvent<'_>) {
        (**self).on_pop(event);
    }

    fn on_prune(&mut self, event: &IterationEvent<'_>) {
        (**self).on_prune(event);
    }

    fn on_expand(&mut self, event: &IterationEvent<'_>, children: &[SearchNodeV1]) {
        (**self).on_expand(event, children);
    }

    fn on_leaf(&mut self, event: &IterationEvent<'_>) {
        (**self).on_leaf(event);
    }

    fn on_incumbent(&mut self, node: &SearchNodeV1, previous: Option<u32>) {
        (**self).on_incumbent(node, previous);
    }

    fn on_co_optimal(&mut self, node: &SearchNodeV1) {
        (**self).on_co_optimal(node);
    }

    fn on_finish(&mut self, event: &FinishEvent<'_>) {
        (**self).on_finish(event);
    }
}
