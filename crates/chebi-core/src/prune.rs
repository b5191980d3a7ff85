//! The pruning pipeline.
//!
//! [`PruningEngine::prepare`] runs the configured [`PruneStep`]s in order over
//! a graph it borrows exclusively, so no other pass can observe or mutate
//! the graph mid-pipeline. Each pass leaves the graph free of dangling
//! edges.
//!
//! A missing anchor never aborts the pipeline: the affected removal is
//! logged, recorded in the [`PruneReport`], and skipped.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{AnchorRemoval, PruneConfig, PruneStep};
use crate::error::CoreError;
use crate::graph::OntologyGraph;
use crate::id::EntityId;
use crate::subgraph::{get_group, Traversal};

/// Outcome of one pipeline step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub label: String,
    pub nodes_removed: usize,
    pub edges_removed: usize,
    /// Anchors that were absent when their removal ran.
    pub skipped_anchors: Vec<EntityId>,
}

/// Summary of a full [`PruningEngine::prepare`] run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PruneReport {
    pub nodes_before: usize,
    pub edges_before: usize,
    pub nodes_after: usize,
    pub edges_after: usize,
    pub steps: Vec<StepReport>,
}

/// Removes the neighborhood of `anchor` (anchor included) from the graph.
///
/// Returns the number of nodes removed, or [`CoreError::NodeNotFound`] when
/// the anchor is absent, in which case the graph is left unchanged.
pub fn remove_subgraph(
    graph: &mut OntologyGraph,
    anchor: &str,
    depth: usize,
    traversal: Traversal,
) -> Result<usize, CoreError> {
    let members = get_group(graph, anchor, depth, traversal)?;
    Ok(graph.remove_nodes(&members))
}

/// Runs the curation passes over an ontology graph.
#[derive(Debug, Clone, Default)]
pub struct PruningEngine {
    config: PruneConfig,
}

impl PruningEngine {
    pub fn new(config: PruneConfig) -> Self {
        PruningEngine { config }
    }

    /// Runs every configured step in order and reports what each removed.
    pub fn prepare(&self, graph: &mut OntologyGraph) -> PruneReport {
        let nodes_before = graph.node_count();
        let edges_before = graph.edge_count();

        let steps = self
            .config
            .steps
            .iter()
            .map(|step| self.run_step(graph, step))
            .collect();

        let report = PruneReport {
            nodes_before,
            edges_before,
            nodes_after: graph.node_count(),
            edges_after: graph.edge_count(),
            steps,
        };
        info!(
            "pruning done: {} -> {} nodes, {} -> {} edges",
            report.nodes_before, report.nodes_after, report.edges_before, report.edges_after
        );
        report
    }

    fn run_step(&self, graph: &mut OntologyGraph, step: &PruneStep) -> StepReport {
        info!("Removing {}", step.label());
        let edges_before = graph.edge_count();
        let mut report = StepReport {
            label: step.label().to_string(),
            nodes_removed: 0,
            edges_removed: 0,
            skipped_anchors: Vec::new(),
        };

        match step {
            PruneStep::RemoveSubgraphs { anchors, .. } => {
                for removal in anchors {
                    match self.remove_anchored(graph, removal) {
                        Ok(n) => report.nodes_removed += n,
                        Err(e) => {
                            warn!("skipping removal around {}: {}", removal.anchor, e);
                            report.skipped_anchors.push(removal.anchor.clone());
                        }
                    }
                }
            }
            PruneStep::RemoveClassNodes => {
                report.nodes_removed = self.remove_compound_classes(graph);
            }
        }

        // Removed nodes take their incident edges with them.
        report.edges_removed = edges_before - graph.edge_count();
        info!(
            "{}: removed {} nodes, {} edges",
            report.label, report.nodes_removed, report.edges_removed
        );
        report
    }

    fn remove_anchored(
        &self,
        graph: &mut OntologyGraph,
        removal: &AnchorRemoval,
    ) -> Result<usize, CoreError> {
        let removed = remove_subgraph(
            graph,
            removal.anchor.as_str(),
            removal.depth,
            removal.traversal,
        )?;
        debug!(
            "anchor {} (depth {}, {:?}): removed {} nodes",
            removal.anchor, removal.depth, removal.traversal, removed
        );
        Ok(removed)
    }

    /// Drops every node that is not a concrete compound, then every edge
    /// whose relation is not retained. Returns the number of nodes removed.
    pub fn remove_compound_classes(&self, graph: &mut OntologyGraph) -> usize {
        let filter = &self.config.filter;
        let doomed: Vec<EntityId> = graph
            .nodes()
            .filter(|node| !filter.is_real_compound(node))
            .map(|node| node.id.clone())
            .collect();
        let removed = graph.remove_nodes(&doomed);

        let dropped_edges = graph.remove_edges(|_, _, relation| !self.config.retains(relation));
        debug!("dropped {} edges outside the retained relations", dropped_edges);
        removed
    }
}
