//! Ontology entity records.

use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::property::{PropertyMap, PropertyValue};

/// A node of the ontology graph.
///
/// `properties` is `None` when the entity carried no property facts at all,
/// which is distinct from carrying facts none of which parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundNode {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<PropertyMap>,
}

impl CompoundNode {
    /// Creates a node without any property facts.
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        CompoundNode {
            id: id.into(),
            name: name.into(),
            properties: None,
        }
    }

    /// Creates a node from its raw property-fact list.
    pub fn with_facts<I, S>(id: impl Into<EntityId>, name: impl Into<String>, facts: Option<I>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        CompoundNode {
            id: id.into(),
            name: name.into(),
            properties: facts.map(PropertyMap::from_facts),
        }
    }

    pub fn has_properties(&self) -> bool {
        self.properties.is_some()
    }

    /// Looks up a property value. `None` if the node has no facts or no
    /// fact for `key`.
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.as_ref()?.get(key)
    }
}
