//! Id-indexed attribute table built from node properties.
//!
//! Each row carries the node id, the numeric compound id derived from it,
//! the display name and one column per requested property key. Missing
//! properties are `None`, never errors.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::CoreError;
use crate::graph::OntologyGraph;
use crate::id::EntityId;
use crate::property::PropertyValue;

/// Property keys exported when the caller does not pick any.
pub const DEFAULT_KEYS: [&str; 5] = ["monoisotopicmass", "charge", "formula", "inchikey", "smiles"];

/// One table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeRow {
    pub id: EntityId,
    pub compound_id: Option<u64>,
    pub name: String,
    #[serde(flatten)]
    pub values: IndexMap<String, Option<PropertyValue>>,
}

impl AttributeRow {
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.values.get(key).and_then(Option::as_ref)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AttributeTable {
    rows: IndexMap<EntityId, AttributeRow>,
}

impl AttributeTable {
    /// Appends a row. Duplicate ids are an integrity violation.
    pub fn insert(&mut self, row: AttributeRow) -> Result<(), CoreError> {
        if self.rows.contains_key(&row.id) {
            return Err(CoreError::DuplicateNode { id: row.id });
        }
        self.rows.insert(row.id.clone(), row);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&AttributeRow> {
        self.rows.get(id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &AttributeRow> {
        self.rows.values()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Builds the attribute table for every node currently in the graph.
pub fn build_attribute_table<S: AsRef<str>>(
    graph: &OntologyGraph,
    keys: &[S],
) -> Result<AttributeTable, CoreError> {
    let mut table = AttributeTable::default();
    for node in graph.nodes() {
        let values = keys
            .iter()
            .map(|key| {
                let key = key.as_ref();
                (key.to_string(), node.property(key).cloned())
            })
            .collect();
        table.insert(AttributeRow {
            id: node.id.clone(),
            compound_id: node.id.compound_number(),
            name: node.name.clone(),
            values,
        })?;
    }
    Ok(table)
}
