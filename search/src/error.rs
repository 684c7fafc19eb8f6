//! Typed search errors.
//!
//! `SearchError` covers pre-flight policy failures and the frontier resource
//! cap. Running out of the iteration budget is not an error: it is reported
//! through [`crate::search::TerminationReasonV1`] with whatever incumbent
//! the search had found.

/// Typed failure for search execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A policy field holds a value the engine cannot honor.
    InvalidPolicy { detail: String },
    /// The frontier grew past `max_frontier_size`.
    FrontierLimitExceeded { limit: u64, iterations: u64 },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
            Self::FrontierLimitExceeded { limit, iterations } => write!(
                f,
                "frontier exceeded {limit} entries after {iterations} iterations"
            ),
        }
    }
}

impl std::error::Error for SearchError {}
