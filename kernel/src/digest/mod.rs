//! Content addressing: typed hash domains, SHA-256 content hashes, and
//! canonical JSON bytes.
//!
//! Every digest in the workspace (state fingerprints, graph digests, trace and
//! report digests) is computed here. Nothing else in the workspace touches
//! `sha2` directly.

pub mod canon;
pub mod hash;
pub mod hash_domain;
