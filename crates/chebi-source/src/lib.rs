//! Ontology sources for chebi graphs.
//!
//! Provides the [`OntologySource`] trait, the iterator contract a loader
//! must satisfy to populate an [`OntologyGraph`], and [`OboDocument`], a
//! reader for OBO 1.2 flat files such as `chebi.obo`.
//!
//! # Modules
//!
//! - [`error`]: SourceError enum with all failure modes
//! - [`traits`]: OntologySource trait and the term/relation records
//! - [`obo`]: OBO flat-file reader

pub mod error;
pub mod obo;
pub mod traits;

// Re-export key types for ergonomic use.
pub use error::SourceError;
pub use obo::OboDocument;
pub use traits::{load_graph, OntologySource, SourceRelation, SourceTerm};

use chebi_core::OntologyGraph;

/// Reads an OBO file and builds the graph it describes.
pub fn load_obo_file(path: impl AsRef<std::path::Path>) -> Result<OntologyGraph, SourceError> {
    let document = OboDocument::from_path(path)?;
    load_graph(&document)
}
