// Gene Ontology lookup and report library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//
// Turns the Gene Ontology OBO flat file into a JSON lookup table keyed by term
// id, and uses that table to post-process Ontologizer enrichment results.
//
// Layout:
// - obo: streaming `[Term]` block parser and the term record it produces
// - lookup: ordered id -> record table, its builder and JSON persistence
// - reporter: build progress reporting handed to the builder by the caller
// - report: annotation lookups, results table reformatting, REVIGO requests

pub mod lookup;
pub mod models;
pub mod obo;
pub mod report;
pub mod reporter;

use std::path::PathBuf;

// Re-export main types
pub use lookup::{obo_to_json, BuildOptions, LookupBuilder, LookupTable};
pub use models::{Calculation, MultipleTestingCorrection};
pub use obo::{FieldMap, OboParser, TermRecord};
pub use reporter::{BuildReporter, BuildSummary, NullReporter, TracingReporter};

/// Result type for GO operations
pub type Result<T> = std::result::Result<T, GoError>;

/// Error types for GO lookup building and report processing
#[derive(Debug, thiserror::Error)]
pub enum GoError {
    #[error("IO error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read line {line_number}: {source}")]
    Read {
        line_number: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Stream(#[from] std::io::Error),

    #[error("Malformed line {line_number}: no ':' separator in '{line}'")]
    MalformedLine { line_number: usize, line: String },

    #[error("Term block starting at line {line_number} has no id:\n{block}")]
    MissingId { line_number: usize, block: String },

    #[error("Duplicate term id: {0}")]
    DuplicateId(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid results table: {0}")]
    InvalidTable(String),

    #[error("Invalid annotation file: {0}")]
    InvalidAnnotation(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl GoError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GoError::Io {
            path: path.into(),
            source,
        }
    }
}
