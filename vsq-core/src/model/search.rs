//! src/model/search.rs
//! ============================================================================
//! # Search Domain Types
//!
//! Plain data produced by the remote search service. A `ResultSet` is
//! immutable once built and is always replaced wholesale, never merged.

use serde::{Deserialize, Serialize};

/// One ranked entry: a document label and its relevance score.
///
/// Scores are conventionally in `0..=1` but nothing client-side relies on
/// that; labels are not required to be unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub label: String,
    pub score: f64,
}

/// Complete outcome of one search call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    /// Query text the service answered, echoed back verbatim.
    pub query: String,

    /// Entries in service rank order.
    pub entries: Vec<ResultEntry>,

    /// Service-reported time spent answering, in seconds.
    pub elapsed_secs: f64,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Service-reported time in milliseconds, for display.
    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed_secs * 1000.0
    }
}
