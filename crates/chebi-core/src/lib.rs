pub mod config;
pub mod edge;
pub mod error;
pub mod filter;
pub mod graph;
pub mod id;
pub mod node;
pub mod property;
pub mod prune;
pub mod render;
pub mod resolve;
pub mod subgraph;
pub mod table;

// Re-export commonly used types
pub use config::{AnchorRemoval, PruneConfig, PruneStep};
pub use edge::Relation;
pub use error::CoreError;
pub use filter::CompoundFilter;
pub use graph::OntologyGraph;
pub use id::EntityId;
pub use node::CompoundNode;
pub use property::{PropertyMap, PropertyValue};
pub use prune::{remove_subgraph, PruneReport, PruningEngine, StepReport};
pub use render::RenderPayload;
pub use resolve::{resolve_representative, Representative};
pub use subgraph::{extract_neighborhood, get_group, neighborhood, Traversal};
pub use table::{build_attribute_table, AttributeRow, AttributeTable, DEFAULT_KEYS};
