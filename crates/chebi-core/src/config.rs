//! Pruning pipeline configuration.
//!
//! [`PruneConfig::default`] is the fixed curation pipeline: deuterated
//! compounds, oligopeptides and isotopically modified compounds are cut out
//! around their anchor classes, then class nodes and non-curated relations
//! are dropped. A JSON document with the same shape can override any part.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::edge::Relation;
use crate::error::CoreError;
use crate::filter::CompoundFilter;
use crate::id::EntityId;
use crate::subgraph::Traversal;

/// One anchor-rooted removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorRemoval {
    pub anchor: EntityId,
    pub depth: usize,
    pub traversal: Traversal,
}

impl AnchorRemoval {
    pub fn new(anchor: &str, depth: usize, traversal: Traversal) -> Self {
        AnchorRemoval {
            anchor: anchor.into(),
            depth,
            traversal,
        }
    }
}

/// A pass of the pruning pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PruneStep {
    /// Remove the neighborhoods of each anchor, in order.
    RemoveSubgraphs {
        label: String,
        anchors: Vec<AnchorRemoval>,
    },
    /// Remove nodes failing the compound filter, then non-retained edges.
    RemoveClassNodes,
}

impl PruneStep {
    pub fn label(&self) -> &str {
        match self {
            PruneStep::RemoveSubgraphs { label, .. } => label,
            PruneStep::RemoveClassNodes => "compound classes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PruneConfig {
    pub steps: Vec<PruneStep>,
    pub filter: CompoundFilter,
    pub retained_relations: Vec<Relation>,
}

impl Default for PruneConfig {
    fn default() -> Self {
        let peptide = |anchor: &str| AnchorRemoval::new(anchor, 1, Traversal::Both);
        PruneConfig {
            steps: vec![
                PruneStep::RemoveSubgraphs {
                    label: "deuterated compounds".into(),
                    anchors: vec![AnchorRemoval::new("CHEBI:76107", 1, Traversal::Both)],
                },
                PruneStep::RemoveSubgraphs {
                    label: "oligopeptides".into(),
                    anchors: vec![
                        peptide("CHEBI:46761"), // dipeptide
                        peptide("CHEBI:47923"), // tripeptide
                        peptide("CHEBI:48030"), // tetrapeptide
                        peptide("CHEBI:48545"), // pentapeptide
                        peptide("CHEBI:25676"), // oligopeptide
                    ],
                },
                PruneStep::RemoveSubgraphs {
                    label: "isotopically modified compounds".into(),
                    anchors: vec![AnchorRemoval::new("CHEBI:139358", 2, Traversal::Incoming)],
                },
                PruneStep::RemoveClassNodes,
            ],
            filter: CompoundFilter::default(),
            retained_relations: Relation::CURATED.to_vec(),
        }
    }
}

impl PruneConfig {
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        let config: PruneConfig = serde_json::from_str(text).map_err(|e| CoreError::Config {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CoreError::Config {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.filter.min_mass > self.filter.max_mass {
            return Err(CoreError::Config {
                reason: format!(
                    "mass interval is empty: [{}, {}]",
                    self.filter.min_mass, self.filter.max_mass
                ),
            });
        }
        Ok(())
    }

    pub fn retains(&self, relation: &Relation) -> bool {
        self.retained_relations.contains(relation)
    }
}
