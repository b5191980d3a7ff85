//! Node/edge payloads handed to an external graph viewer.
//!
//! The core only assembles the payload; drawing it is someone else's job.
//! Requests over the node ceiling yield no payload at all.

use serde::Serialize;
use tracing::warn;

use crate::graph::OntologyGraph;

pub const DEFAULT_MAX_NODES: usize = 250;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderNode {
    pub id: String,
    /// Hover text.
    pub title: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderEdge {
    pub from: String,
    pub to: String,
    pub relation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderPayload {
    pub name: String,
    pub directed: bool,
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
}

impl RenderPayload {
    /// Builds a payload for `graph`, or `None` if it has more than
    /// `max_nodes` nodes.
    pub fn build(graph: &OntologyGraph, name: &str, max_nodes: usize) -> Option<Self> {
        let n_nodes = graph.node_count();
        if n_nodes > max_nodes {
            warn!("Too many nodes to plot (n={}, limit {})", n_nodes, max_nodes);
            return None;
        }

        let nodes = graph
            .nodes()
            .map(|node| RenderNode {
                id: node.id.to_string(),
                title: node.id.to_string(),
                label: format!("{}\n{}", node.id, node.name),
            })
            .collect();
        let edges = graph
            .edges()
            .map(|(from, to, relation)| RenderEdge {
                from: from.to_string(),
                to: to.to_string(),
                relation: relation.to_string(),
            })
            .collect();

        Some(RenderPayload {
            name: name.to_string(),
            directed: true,
            nodes,
            edges,
        })
    }
}
