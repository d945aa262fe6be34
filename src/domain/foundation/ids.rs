//! Content-derived cycle identifiers.

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::fmt;

/// Truncated digest length in hex characters.
const DIGEST_LEN: usize = 12;

/// Stable identifier for a cycle, derived from its distinguishing content.
///
/// The same input parts always produce the same id, so repeated computation
/// with identical inputs is byte-identical and callers may cache by id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleId(String);

impl CycleId {
    /// Derives an id from an ordered list of distinguishing string parts.
    ///
    /// Parts are joined with `|`, hashed with SHA-1, and the digest truncated
    /// to 12 hex characters under a `cycle-` prefix.
    pub fn derive(parts: &[&str]) -> Self {
        let raw = parts.join("|");
        let digest = Sha1::digest(raw.as_bytes());
        let mut hex = String::with_capacity(DIGEST_LEN);
        for byte in digest.iter().take(DIGEST_LEN / 2) {
            hex.push_str(&format!("{:02x}", byte));
        }
        Self(format!("cycle-{}", hex))
    }

    /// Wraps an id produced by an upstream collaborator.
    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
