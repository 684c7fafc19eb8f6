//! Matchbound Harness: everything around the engine.
//!
//! Instance sources (G(n,p) sampling, edge-list files), the runner that
//! drives `matchbound_search` and packages a [`report::RunReportV1`], DOT
//! rendering of the best matching, run-directory persistence, an exhaustive
//! oracle for small graphs, and logger setup for the `matchbound` binary.
//!
//! The harness does NOT implement search logic; it delegates to the engine.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod gnp;
pub mod io;
pub mod logging;
pub mod oracle;
pub mod render;
pub mod report;
pub mod report_dir;
pub mod runner;
