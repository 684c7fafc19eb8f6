//! Matchbound Search: best-first branch-and-bound over matching states.
//!
//! This crate provides the engine layer. It depends only on
//! `matchbound_kernel` and does NOT depend on `matchbound_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! matchbound_kernel  ←  matchbound_search  ←  matchbound_harness
//! (graph, state)        (frontier, engine)     (gnp, render, report, CLI)
//! ```
//!
//! # Key types
//!
//! - [`node::SearchNodeV1`] -- a fingerprinted state with deterministic ordering
//! - [`frontier::BestFirstFrontier`] -- max-heap frontier plus visited set
//! - [`policy::SearchPolicyV1`] -- ordering, dedup, prune rule and caps
//! - [`observer::SearchObserver`] -- event hooks (logging, tracing)
//! - [`trace::SearchTraceV1`] -- recorded audit log with canonical JSON
//! - [`search::search`] -- the engine entry point

#![forbid(unsafe_code)]

pub mod error;
pub mod frontier;
pub mod node;
pub mod observer;
pub mod policy;
pub mod search;
pub mod trace;
