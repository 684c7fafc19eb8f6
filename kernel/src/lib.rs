//! Matchbound Kernel: problem graphs and branch-and-bound matching states.
//!
//! # API Surface
//!
//! - [`graph::ProblemGraphV1`] -- the static undirected graph being matched
//! - [`state::MatchingStateV1`] -- an edge partition with its incremental bound
//! - [`build_state`] -- the root state of a search
//! - [`digest`] -- content hashes and canonical JSON used for fingerprints
//!
//! # Module Dependency Direction
//!
//! `digest` ← `graph` ← `state`
//!
//! One-way only. `digest` depends on nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod digest;
pub mod graph;
pub mod state;

use std::sync::Arc;

use graph::ProblemGraphV1;
use state::MatchingStateV1;

/// Build the root state (every edge free) for `graph`.
#[must_use]
pub fn build_state(graph: impl Into<Arc<ProblemGraphV1>>) -> MatchingStateV1 {
    MatchingStateV1::root(graph)
}
