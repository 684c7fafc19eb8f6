//! Harness runner: solve one instance and package the result.
//!
//! # Pipeline
//!
//! ```text
//! graph → MatchingStateV1::root → search() [+ TraceRecorder]
//!   → RunReportV1::build → RunOutcome
//! ```

use std::sync::Arc;

use matchbound_kernel::digest::canon::CanonError;
use matchbound_kernel::graph::{GraphError, ProblemGraphV1};
use matchbound_kernel::state::MatchingStateV1;
use matchbound_search::error::SearchError;
use matchbound_search::observer::SearchObserver;
use matchbound_search::policy::SearchPolicyV1;
use matchbound_search::search::{search, SearchResult};
use matchbound_search::trace::{SearchTraceV1, TraceRecorder};

use crate::gnp::GnpError;
use crate::io::EdgeListError;
use crate::render::RenderError;
use crate::report::RunReportV1;
use crate::report_dir::{RunDirVerifyError, RunDirWriteError};

/// Error during a harness run.
#[derive(Debug)]
pub enum RunError {
    Graph(GraphError),
    Gnp(GnpError),
    EdgeList(EdgeListError),
    Search(SearchError),
    Canon(CanonError),
    Render(RenderError),
    RunDirWrite(RunDirWriteError),
    RunDirVerify(RunDirVerifyError),
    /// The search result disagrees with exhaustive enumeration.
    OracleMismatch { found: usize, expected: usize },
    Io(std::io::Error),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Graph(e) => write!(f, "graph error: {e}"),
            Self::Gnp(e) => write!(f, "generator error: {e}"),
            Self::EdgeList(e) => write!(f, "edge list error: {e}"),
            Self::Search(e) => write!(f, "search error: {e}"),
            Self::Canon(e) => write!(f, "canonical JSON error: {e}"),
            Self::Render(e) => write!(f, "render error: {e}"),
            Self::RunDirWrite(e) => write!(f, "run directory write error: {e}"),
            Self::RunDirVerify(e) => write!(f, "run directory verify error: {e}"),
            Self::OracleMismatch { found, expected } => write!(
                f,
                "search found a matching of size {found}, exhaustive enumeration found {expected}"
            ),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for RunError {}

macro_rules! run_error_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for RunError {
                fn from(e: $source) -> Self {
                    Self::$variant(e)
                }
            }
        )*
    };
}

run_error_from! {
    GraphError => Graph,
    GnpError => Gnp,
    EdgeListError => EdgeList,
    SearchError => Search,
    CanonError => Canon,
    RenderError => Render,
    RunDirWriteError => RunDirWrite,
    RunDirVerifyError => RunDirVerify,
    std::io::Error => Io,
}

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub graph: Arc<ProblemGraphV1>,
    pub result: SearchResult,
    pub report: RunReportV1,
    /// Present when the run was asked to record a trace.
    pub trace: Option<SearchTraceV1>,
}

/// Solve `graph` under `policy`, forwarding events to `observer`.
///
/// With `record_trace`, a [`TraceRecorder`] observes the run alongside
/// `observer` and the trace digest is bound into the report.
///
/// # Errors
///
/// Returns [`RunError::Search`] if the policy is rejected or the frontier cap
/// is exceeded, and [`RunError::Canon`] if the report fails to serialize.
pub fn run_instance(
    graph: impl Into<Arc<ProblemGraphV1>>,
    policy: &SearchPolicyV1,
    observer: &mut dyn SearchObserver,
    record_trace: bool,
) -> Result<RunOutcome, RunError> {
    let graph = graph.into();
    let root = MatchingStateV1::root(Arc::clone(&graph));

    let (result, trace) = if record_trace {
        let mut recorder = TraceRecorder::new();
        let result = search(root, policy, &mut (&mut recorder, &mut *observer))?;
        (result, Some(recorder.into_trace()))
    } else {
        (search(root, policy, observer)?, None)
    };

    let report = RunReportV1::build(&graph, policy, &result, trace.as_ref())?;
    log::info!(
        "solved n={} m={}: {} in {} iterations ({}), report {}",
        graph.node_count(),
        graph.edge_count(),
        result
            .best_state()
            .map_or_else(|| "no leaf".to_string(), |s| format!("matching size {}", s.matching_size())),
        result.iterations(),
        result.termination.as_str(),
        report.digest.short(),
    );

    Ok(RunOutcome {
        graph,
        result,
        report,
        trace,
    })
}
