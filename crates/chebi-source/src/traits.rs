//! The [`OntologySource`] trait: the contract between a raw ontology file
//! and the graph model.
//!
//! A source yields term records and typed directed relations. How the file
//! is obtained or encoded is the source's business; [`load_graph`] only
//! consumes the two iterators.

use chebi_core::{CompoundNode, EntityId, OntologyGraph, Relation};
use tracing::info;

use crate::error::SourceError;

/// One entity as read from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTerm {
    pub id: EntityId,
    pub name: String,
    /// Raw property-fact strings; `None` if the entity had none.
    pub property_facts: Option<Vec<String>>,
}

/// One typed, directed relation as read from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRelation {
    pub from: EntityId,
    pub to: EntityId,
    pub relation: Relation,
}

pub trait OntologySource {
    fn terms(&self) -> Box<dyn Iterator<Item = SourceTerm> + '_>;

    fn relations(&self) -> Box<dyn Iterator<Item = SourceRelation> + '_>;
}

/// Populates a fresh graph from a source.
///
/// Duplicate ids and relations pointing at unknown terms abort the load.
pub fn load_graph<S: OntologySource + ?Sized>(source: &S) -> Result<OntologyGraph, SourceError> {
    let nodes = source
        .terms()
        .map(|term| CompoundNode::with_facts(term.id, term.name, term.property_facts));
    let edges = source
        .relations()
        .map(|rel| (rel.from, rel.to, rel.relation));
    let graph = OntologyGraph::from_parts(nodes, edges)?;
    info!(
        "loaded ontology: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        terms: Vec<SourceTerm>,
        relations: Vec<SourceRelation>,
    }

    impl OntologySource for Fixed {
        fn terms(&self) -> Box<dyn Iterator<Item = SourceTerm> + '_> {
            Box::new(self.terms.iter().cloned())
        }

        fn relations(&self) -> Box<dyn Iterator<Item = SourceRelation> + '_> {
            Box::new(self.relations.iter().cloned())
        }
    }

    fn term(id: &str) -> SourceTerm {
        SourceTerm {
            id: id.into(),
            name: id.to_lowercase(),
            property_facts: None,
        }
    }

    #[test]
    fn load_builds_graph() {
        let source = Fixed {
            terms: vec![term("A"), term("B")],
            relations: vec![SourceRelation {
                from: "A".into(),
                to: "B".into(),
                relation: Relation::IsA,
            }],
        };
        let graph = load_graph(&source).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn load_rejects_dangling_relation() {
        let source = Fixed {
            terms: vec![term("A")],
            relations: vec![SourceRelation {
                from: "A".into(),
                to: "B".into(),
                relation: Relation::IsA,
            }],
        };
        assert!(matches!(load_graph(&source), Err(SourceError::Graph(_))));
    }

    #[test]
    fn load_rejects_duplicate_terms() {
        let source = Fixed {
            terms: vec![term("A"), term("A")],
            relations: vec![],
        };
        match load_graph(&source) {
            Err(SourceError::Graph(e)) => assert!(e.is_integrity_violation()),
            other => panic!("expected integrity error, got {:?}", other),
        }
    }
}
