//! Life-domain buckets shared by cycles and the classifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse life-domain bucket for a signal or window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifeDomain {
    Career,
    Relationships,
    Growth,
}

impl LifeDomain {
    /// Returns the wire token for this domain.
    pub fn as_str(&self) -> &'static str {
        match self {
            LifeDomain::Career => "career",
            LifeDomain::Relationships => "relationships",
            LifeDomain::Growth => "growth",
        }
    }
}

impl Default for LifeDomain {
    fn default() -> Self {
        LifeDomain::Growth
    }
}

impl fmt::Display for LifeDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
