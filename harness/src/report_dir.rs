//! Run directory persistence: write and verify a solved run on disk.
//!
//! # Directory layout (`RunDirectoryV1`)
//!
//! ```text
//! <dir>/
//!   report.json          canonical JSON, `RunReportV1` document
//!   report_digest.txt    ASCII digest string (e.g. "sha256:...")
//!   trace.json           canonical JSON, `SearchTraceV1` (only if recorded)
//!   matching.dot         DOT rendering of the best matching (only if any)
//! ```
//!
//! The directory path is never part of any hash surface.
//!
//! # Fail-closed semantics
//!
//! - Missing `report.json` or `report_digest.txt` → error
//! - Extra files → error
//! - Digest text or trace digest disagreeing with the report → error

use std::collections::BTreeSet;
use std::path::Path;

use matchbound_kernel::digest::canon::canonical_json_bytes;
use matchbound_kernel::digest::hash::{canonical_hash, ContentHash};
use matchbound_kernel::digest::hash_domain::HashDomain;

use crate::render::to_dot_string;
use crate::report::{verify_report_bytes, ReportVerifyError};
use crate::runner::RunOutcome;

const REPORT_FILENAME: &str = "report.json";
const DIGEST_FILENAME: &str = "report_digest.txt";
const TRACE_FILENAME: &str = "trace.json";
const DOT_FILENAME: &str = "matching.dot";

const KNOWN_FILENAMES: &[&str] = &[REPORT_FILENAME, DIGEST_FILENAME, TRACE_FILENAME, DOT_FILENAME];

/// Error writing a run directory.
#[derive(Debug)]
pub enum RunDirWriteError {
    Io { detail: String },
    CanonError { detail: String },
    Render { detail: String },
}

impl std::fmt::Display for RunDirWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::CanonError { detail } => write!(f, "canonical JSON error: {detail}"),
            Self::Render { detail } => write!(f, "render error: {detail}"),
        }
    }
}

impl std::error::Error for RunDirWriteError {}

/// Error verifying a run directory.
#[derive(Debug)]
pub enum RunDirVerifyError {
    Io { detail: String },
    MissingFile { filename: String },
    ExtraFile { name: String },
    Report(ReportVerifyError),
    /// `report_digest.txt` disagrees with `report.json`.
    DigestMismatch { stored: String, recomputed: String },
    /// `trace.json` does not hash to the digest the report records.
    TraceMismatch {
        recorded: Option<String>,
        recomputed: String,
    },
}

impl std::fmt::Display for RunDirVerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::MissingFile { filename } => write!(f, "missing file: {filename}"),
            Self::ExtraFile { name } => write!(f, "unexpected extra file: {name}"),
            Self::Report(e) => write!(f, "report error: {e}"),
            Self::DigestMismatch { stored, recomputed } => {
                write!(f, "digest mismatch: stored={stored}, recomputed={recomputed}")
            }
            Self::TraceMismatch {
                recorded,
                recomputed,
            } => write!(
                f,
                "trace mismatch: recorded={}, recomputed={recomputed}",
                recorded.as_deref().unwrap_or("none")
            ),
        }
    }
}

impl std::error::Error for RunDirVerifyError {}

/// Write `outcome` to `dir` in `RunDirectoryV1` format, creating `dir` if
/// needed.
///
/// # Errors
///
/// Returns [`RunDirWriteError`] on I/O, serialization or render failure.
pub fn write_run_dir(outcome: &RunOutcome, dir: &Path) -> Result<(), RunDirWriteError> {
    std::fs::create_dir_all(dir).map_err(|e| RunDirWriteError::Io {
        detail: format!("create_dir_all: {e}"),
    })?;

    let canon_err = |e: matchbound_kernel::digest::canon::CanonError| {
        RunDirWriteError::CanonError {
            detail: e.to_string(),
        }
    };

    let report_bytes = outcome.report.to_canonical_json_bytes().map_err(canon_err)?;
    write_atomic(&dir.join(REPORT_FILENAME), &report_bytes)?;
    write_atomic(
        &dir.join(DIGEST_FILENAME),
        outcome.report.digest.as_str().as_bytes(),
    )?;

    if let Some(trace) = &outcome.trace {
        let bytes = trace.to_canonical_json_bytes().map_err(canon_err)?;
        write_atomic(&dir.join(TRACE_FILENAME), &bytes)?;
    }
    if let Some(best) = outcome.result.best_state() {
        let dot = to_dot_string(best).map_err(|e| RunDirWriteError::Render {
            detail: e.to_string(),
        })?;
        write_atomic(&dir.join(DOT_FILENAME), dot.as_bytes())?;
    }
    Ok(())
}

/// Verify a run directory written by [`write_run_dir`] and return the
/// report digest.
///
/// # Errors
///
/// Returns [`RunDirVerifyError`] on the first failed check.
pub fn verify_run_dir(dir: &Path) -> Result<ContentHash, RunDirVerifyError> {
    for name in list_files(dir)? {
        if !KNOWN_FILENAMES.contains(&name.as_str()) {
            return Err(RunDirVerifyError::ExtraFile { name });
        }
    }

    let report_bytes = read_required(dir, REPORT_FILENAME)?;
    let digest = verify_report_bytes(&report_bytes).map_err(RunDirVerifyError::Report)?;

    let stored = String::from_utf8_lossy(&read_required(dir, DIGEST_FILENAME)?)
        .trim()
        .to_string();
    if stored != digest.as_str() {
        return Err(RunDirVerifyError::DigestMismatch {
            stored,
            recomputed: digest.as_str().to_string(),
        });
    }

    let report: serde_json::Value =
        serde_json::from_slice(&report_bytes).map_err(|e| RunDirVerifyError::Io {
            detail: e.to_string(),
        })?;
    let recorded = report["observational"]["trace_digest"]
        .as_str()
        .map(str::to_string);
    match std::fs::read(dir.join(TRACE_FILENAME)) {
        Ok(trace_bytes) => {
            let value: serde_json::Value = serde_json::from_slice(&trace_bytes)
                .map_err(|e| RunDirVerifyError::Io {
                    detail: format!("{TRACE_FILENAME}: {e}"),
                })?;
            let canonical = canonical_json_bytes(&value)
                .map_err(|e| RunDirVerifyError::Report(ReportVerifyError::Canon(e)))?;
            let recomputed = canonical_hash(HashDomain::SearchTrace, &canonical);
            if canonical != trace_bytes || recorded.as_deref() != Some(recomputed.as_str()) {
                return Err(RunDirVerifyError::TraceMismatch {
                    recorded,
                    recomputed: recomputed.as_str().to_string(),
                });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if recorded.is_some() {
                return Err(RunDirVerifyError::MissingFile {
                    filename: TRACE_FILENAME.to_string(),
                });
            }
        }
        Err(e) => {
            return Err(RunDirVerifyError::Io {
                detail: format!("{TRACE_FILENAME}: {e}"),
            })
        }
    }

    Ok(digest)
}

/// Write bytes via temp file + rename.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), RunDirWriteError> {
    let dir = path.parent().ok_or_else(|| RunDirWriteError::Io {
        detail: "no parent directory".into(),
    })?;
    let temp_path = dir.join(format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    std::fs::write(&temp_path, content).map_err(|e| RunDirWriteError::Io {
        detail: format!("write {}: {e}", temp_path.display()),
    })?;
    std::fs::rename(&temp_path, path).map_err(|e| RunDirWriteError::Io {
        detail: format!("rename {} → {}: {e}", temp_path.display(), path.display()),
    })
}

fn read_required(dir: &Path, filename: &str) -> Result<Vec<u8>, RunDirVerifyError> {
    std::fs::read(dir.join(filename)).map_err(|_| RunDirVerifyError::MissingFile {
        filename: filename.to_string(),
    })
}

fn list_files(dir: &Path) -> Result<BTreeSet<String>, RunDirVerifyError> {
    let entries = std::fs::read_dir(dir).map_err(|e| RunDirVerifyError::Io {
        detail: format!("read_dir {}: {e}", dir.display()),
    })?;
    let mut names = BTreeSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| RunDirVerifyError::Io {
            detail: e.to_string(),
        })?;
        if entry.path().is_file() {
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}
