//! Error types for chebi-source.

use chebi_core::CoreError;
use thiserror::Error;

/// Errors produced while reading an ontology source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source text is not well-formed at the given (1-based) line.
    #[error("parse error at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// The parsed records do not form a valid graph.
    #[error("graph error: {0}")]
    Graph(#[from] CoreError),
}
