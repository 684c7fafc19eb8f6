//! `RunReportV1`: the in-memory summary of one solved instance.
//!
//! No file I/O in this module (see [`crate::report_dir`]).
//!
//! # Normative vs observational fields
//!
//! The report digest covers the **body**: instance digest, policy, outcome,
//! the best matching and the deterministic counters. Wall-clock time and the
//! optional trace digest live in the observational section, outside the
//! digest, so repeated runs of the same instance and policy share a digest.

use std::time::Duration;

use matchbound_kernel::digest::canon::{canonical_json_bytes, CanonError};
use matchbound_kernel::digest::hash::{canonical_hash, ContentHash};
use matchbound_kernel::digest::hash_domain::HashDomain;
use matchbound_kernel::graph::ProblemGraphV1;
use matchbound_search::node::SearchNodeV1;
use matchbound_search::policy::SearchPolicyV1;
use matchbound_search::search::SearchResult;
use matchbound_search::trace::SearchTraceV1;

use serde_json::{json, Value};

pub const REPORT_SCHEMA_VERSION: &str = "run_report.v1";

/// A run report with its precomputed digest.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReportV1 {
    /// Normative body (digested).
    pub body: Value,
    /// Digest of the canonical body bytes under [`HashDomain::RunReport`].
    pub digest: ContentHash,
    pub elapsed: Duration,
    pub trace_digest: Option<ContentHash>,
}

/// Error verifying a serialized report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportVerifyError {
    /// Not JSON, or missing a required field.
    Malformed { detail: String },
    /// `schema_version` is not [`REPORT_SCHEMA_VERSION`].
    SchemaMismatch { found: String },
    /// Stored bytes are not in canonical form.
    NonCanonical,
    /// The stored digest does not match the body.
    DigestMismatch { stored: String, recomputed: String },
    Canon(CanonError),
}

impl std::fmt::Display for ReportVerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed { detail } => write!(f, "malformed report: {detail}"),
            Self::SchemaMismatch { found } => write!(f, "unknown report schema {found:?}"),
            Self::NonCanonical => write!(f, "report bytes are not canonical JSON"),
            Self::DigestMismatch { stored, recomputed } => {
                write!(f, "report digest mismatch: stored {stored}, recomputed {recomputed}")
            }
            Self::Canon(e) => write!(f, "canonical JSON error: {e}"),
        }
    }
}

impl std::error::Error for ReportVerifyError {}

impl RunReportV1 {
    /// Build the report for `result`, solved on `graph` under `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if any digested surface fails to serialize.
    pub fn build(
        graph: &ProblemGraphV1,
        policy: &SearchPolicyV1,
        result: &SearchResult,
        trace: Option<&SearchTraceV1>,
    ) -> Result<Self, CanonError> {
        let stats = &result.stats;
        let body = json!({
            "schema_version": REPORT_SCHEMA_VERSION,
            "graph": {
                "digest": graph.digest()?.as_str(),
                "node_count": graph.node_count(),
                "edge_count": graph.edge_count(),
            },
            "policy": policy.to_json_value(),
            "policy_digest": policy.digest()?.as_str(),
            "termination": result.termination.as_str(),
            "optimal": result.is_optimal(),
            "best": result.best.as_ref().map(node_to_json),
            "co_optimal": result
                .co_optimal
                .iter()
                .map(|n| n.fingerprint.as_str().to_string())
                .collect::<Vec<_>>(),
            "stats": {
                "iterations": stats.iterations,
                "expansions": stats.expansions,
                "leaves": stats.leaves,
                "pruned": stats.pruned,
                "duplicates_suppressed": stats.duplicates_suppressed,
                "nodes_created": stats.nodes_created,
                "frontier_high_water": stats.frontier_high_water,
            },
        });
        let digest = canonical_hash(HashDomain::RunReport, &canonical_json_bytes(&body)?);
        let trace_digest = trace.map(SearchTraceV1::digest).transpose()?;
        Ok(Self {
            body,
            digest,
            elapsed: stats.elapsed,
            trace_digest,
        })
    }

    /// The full document: body, digest, and the observational section.
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        json!({
            "schema_version": REPORT_SCHEMA_VERSION,
            "body": self.body,
            "digest": self.digest.as_str(),
            "observational": {
                "elapsed_micros": u64::try_from(self.elapsed.as_micros()).unwrap_or(u64::MAX),
                "trace_digest": self.trace_digest.as_ref().map(ContentHash::as_str),
            },
        })
    }

    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Size of the reported best matching, if any.
    #[must_use]
    pub fn matching_size(&self) -> Option<u64> {
        self.body["best"]["matching_size"].as_u64()
    }
}

fn node_to_json(node: &SearchNodeV1) -> Value {
    let state = &node.state;
    json!({
        "fingerprint": node.fingerprint.as_str(),
        "matching_size": state.matching_size(),
        "matching": state
            .matching()
            .iter()
            .map(|e| vec![e.u, e.v])
            .collect::<Vec<_>>(),
        "statuses": state
            .edge_statuses()
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>(),
    })
}

/// Check a serialized report: canonical bytes, known schema, and a stored
/// digest that matches the recomputed body digest.
///
/// # Errors
///
/// See [`ReportVerifyError`].
pub fn verify_report_bytes(bytes: &[u8]) -> Result<ContentHash, ReportVerifyError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| ReportVerifyError::Malformed {
        detail: e.to_string(),
    })?;
    let canonical = canonical_json_bytes(&value).map_err(ReportVerifyError::Canon)?;
    if canonical != bytes {
        return Err(ReportVerifyError::NonCanonical);
    }

    let schema = value["schema_version"].as_str().unwrap_or_default();
    if schema != REPORT_SCHEMA_VERSION {
        return Err(ReportVerifyError::SchemaMismatch {
            found: schema.to_string(),
        });
    }
    let stored = value["digest"]
        .as_str()
        .ok_or_else(|| ReportVerifyError::Malformed {
            detail: "missing digest".into(),
        })?;
    let body = value.get("body").ok_or_else(|| ReportVerifyError::Malformed {
        detail: "missing body".into(),
    })?;

    let recomputed = canonical_hash(
        HashDomain::RunReport,
        &canonical_json_bytes(body).map_err(ReportVerifyError::Canon)?,
    );
    if recomputed.as_str() != stored {
        return Err(ReportVerifyError::DigestMismatch {
            stored: stored.to_string(),
            recomputed: recomputed.as_str().to_string(),
        });
    }
    Ok(recomputed)
}
