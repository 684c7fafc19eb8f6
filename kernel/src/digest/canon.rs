//! Canonical JSON bytes: the single serialization-for-hashing routine.
//!
//! Rules:
//! 1. Object keys are emitted in lexicographic byte order at every depth.
//! 2. Compact form, no whitespace.
//! 3. Numbers must be integers (`i64` or `u64`). Floats are rejected so that a
//!    digest never depends on float formatting.
//! 4. Strings are escaped by `serde_json`.

use serde_json::Value;

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonError {
    /// A JSON number was not an integer.
    NonIntegerNumber { raw: String },
    /// `serde_json` failed to encode a string.
    Encode { detail: String },
}

impl std::fmt::Display for CanonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonIntegerNumber { raw } => {
                write!(f, "non-integer number in canonical JSON: {raw}")
            }
            Self::Encode { detail } => write!(f, "canonical JSON encoding failed: {detail}"),
        }
    }
}

impl std::error::Error for CanonError {}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any number is not representable
/// as `i64` or `u64`.
pub fn canonical_json_bytes(value: &Value) -> Result<Vec<u8>, CanonError> {
    let mut buf = Vec::new();
    emit(&mut buf, value)?;
    Ok(buf)
}

fn emit(buf: &mut Vec<u8>, value: &Value) -> Result<(), CanonError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => scalar(buf, value),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                scalar(buf, value)
            } else {
                Err(CanonError::NonIntegerNumber { raw: n.to_string() })
            }
        }
        Value::Array(items) => {
            buf.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                emit(buf, item)?;
            }
            buf.push(b']');
            Ok(())
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
            buf.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                serde_json::to_writer(&mut *buf, key).map_err(encode_error)?;
                buf.push(b':');
                emit(buf, item)?;
            }
            buf.push(b'}');
            Ok(())
        }
    }
}

fn scalar(buf: &mut Vec<u8>, value: &Value) -> Result<(), CanonError> {
    serde_json::to_writer(&mut *buf, value).map_err(encode_error)
}

#[allow(clippy::needless_pass_by_value)]
fn encode_error(e: serde_json::Error) -> CanonError {
    CanonError::Encode {
        detail: e.to_string(),
    }
}
