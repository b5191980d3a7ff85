//! Core error types for chebi-core.
//!
//! Uses `thiserror` for structured, matchable error variants. Absent
//! properties and unparsable property values are not errors; they surface as
//! `None` or as raw text respectively.

use thiserror::Error;

use crate::id::EntityId;

/// Core errors produced by the chebi-core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An entity id was not found in the graph.
    ///
    /// Recoverable during pruning: the affected removal step is skipped.
    #[error("node not found: {id}")]
    NodeNotFound { id: EntityId },

    /// Two nodes were supplied with the same id.
    #[error("duplicate node id: {id}")]
    DuplicateNode { id: EntityId },

    /// An edge references a node that does not exist.
    #[error("edge {from} -[{relation}]-> {to} references a missing node")]
    DanglingEdge {
        from: EntityId,
        to: EntityId,
        relation: String,
    },

    /// Pipeline configuration could not be used.
    #[error("invalid configuration: {reason}")]
    Config { reason: String },
}

impl CoreError {
    /// Returns `true` for errors that indicate a malformed source graph.
    pub fn is_integrity_violation(&self) -> bool {
        matches!(
            self,
            CoreError::DuplicateNode { .. } | CoreError::DanglingEdge { .. }
        )
    }
}
