//! Stable identifiers for ontology entities.
//!
//! Entities are keyed by their namespaced token (e.g. `CHEBI:15377`). The
//! [`EntityId`] newtype keeps those tokens distinct from display names and
//! other free text at the type level.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Namespaced identifier of an ontology entity, e.g. `CHEBI:17234`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(token: impl Into<String>) -> Self {
        EntityId(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derives the integer compound number by stripping the namespace prefix.
    ///
    /// Returns `None` when the remainder is not an unsigned integer.
    pub fn compound_number(&self) -> Option<u64> {
        let local = match self.0.split_once(':') {
            Some((_, rest)) => rest,
            None => self.0.as_str(),
        };
        local.trim().parse().ok()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(token: &str) -> Self {
        EntityId(token.to_string())
    }
}

impl From<String> for EntityId {
    fn from(token: String) -> Self {
        EntityId(token)
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
