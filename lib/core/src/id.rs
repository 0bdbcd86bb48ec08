//! Per-request generation identifiers.
//!
//! IDs use ULID format so log lines from concurrent requests sort by the
//! time the request arrived.

use std::fmt;
use ulid::Ulid;

/// Identifies one generation request from arrival to response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenerationId(Ulid);

impl GenerationId {
    const PREFIX: &'static str = "gen";

    /// Creates a new ID with a randomly generated ULID.
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for GenerationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GenerationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", Self::PREFIX, self.0)
    }
}
