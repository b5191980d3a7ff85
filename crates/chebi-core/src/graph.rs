//! OntologyGraph: the directed multigraph of entities and typed relations.
//!
//! [`OntologyGraph`] owns a petgraph `StableGraph` together with an index from
//! [`EntityId`] to node index. All mutations go through `OntologyGraph`
//! methods so the id index and the graph never disagree, and removing a node
//! always removes its incident edges in the same call.
//!
//! `StableGraph` is used so that node indices held by the id index stay valid
//! across removals.

use std::collections::HashMap;

use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableGraph;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::{Directed, Direction};

use crate::edge::Relation;
use crate::error::CoreError;
use crate::id::EntityId;
use crate::node::CompoundNode;

/// Underlying petgraph storage type.
pub type Topology = StableGraph<CompoundNode, Relation, Directed, u32>;

/// The ontology graph.
#[derive(Debug, Clone, Default)]
pub struct OntologyGraph {
    graph: Topology,
    index: HashMap<EntityId, NodeIndex<u32>>,
}

impl OntologyGraph {
    pub fn new() -> Self {
        OntologyGraph {
            graph: StableGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Builds a graph from node and edge streams.
    ///
    /// Fails on duplicate ids or on an edge whose endpoints are not among
    /// the supplied nodes.
    pub fn from_parts<N, E>(nodes: N, edges: E) -> Result<Self, CoreError>
    where
        N: IntoIterator<Item = CompoundNode>,
        E: IntoIterator<Item = (EntityId, EntityId, Relation)>,
    {
        let mut graph = OntologyGraph::new();
        for node in nodes {
            graph.add_node(node)?;
        }
        for (from, to, relation) in edges {
            graph.add_edge(from.as_str(), to.as_str(), relation)?;
        }
        Ok(graph)
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    /// Returns a read-only reference to the petgraph storage.
    pub fn topology(&self) -> &Topology {
        &self.graph
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<NodeIndex<u32>> {
        self.index.get(id).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Looks up a node by id.
    pub fn get_node(&self, id: &str) -> Result<&CompoundNode, CoreError> {
        self.index_of(id)
            .and_then(|idx| self.graph.node_weight(idx))
            .ok_or_else(|| CoreError::NodeNotFound { id: id.into() })
    }

    /// Iterates over all nodes in node-index order. Slots freed by removals
    /// are reused, so this is not insertion order once nodes were removed.
    pub fn nodes(&self) -> impl Iterator<Item = &CompoundNode> + '_ {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Iterates over all edges as `(from, to, relation)`.
    pub fn edges(&self) -> impl Iterator<Item = (&EntityId, &EntityId, &Relation)> + '_ {
        self.graph.edge_references().map(move |e| {
            (
                &self.graph[e.source()].id,
                &self.graph[e.target()].id,
                e.weight(),
            )
        })
    }

    /// Ids of the nodes reachable over one outgoing edge.
    pub fn neighbors_out(&self, id: &str) -> Result<Vec<&EntityId>, CoreError> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Ids of the nodes with an edge pointing at `id`.
    pub fn neighbors_in(&self, id: &str) -> Result<Vec<&EntityId>, CoreError> {
        self.neighbors(id, Direction::Incoming)
    }

    fn neighbors(&self, id: &str, dir: Direction) -> Result<Vec<&EntityId>, CoreError> {
        let idx = self
            .index_of(id)
            .ok_or_else(|| CoreError::NodeNotFound { id: id.into() })?;
        let mut out: Vec<&EntityId> = self
            .graph
            .neighbors_directed(idx, dir)
            .map(|n| &self.graph[n].id)
            .collect();
        // Parallel edges of different relation types yield repeated neighbors.
        out.sort();
        out.dedup();
        Ok(out)
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Adds a node. Errors if a node with the same id already exists.
    pub fn add_node(&mut self, node: CompoundNode) -> Result<(), CoreError> {
        if self.index.contains_key(&node.id) {
            return Err(CoreError::DuplicateNode { id: node.id });
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(id, idx);
        Ok(())
    }

    /// Adds a typed edge. Both endpoints must already exist.
    pub fn add_edge(&mut self, from: &str, to: &str, relation: Relation) -> Result<(), CoreError> {
        match (self.index_of(from), self.index_of(to)) {
            (Some(a), Some(b)) => {
                self.graph.add_edge(a, b, relation);
                Ok(())
            }
            _ => Err(CoreError::DanglingEdge {
                from: from.into(),
                to: to.into(),
                relation: relation.to_string(),
            }),
        }
    }

    /// Removes the given nodes and every edge incident to them.
    ///
    /// Ids not present in the graph are ignored. Returns the number of
    /// nodes actually removed.
    pub fn remove_nodes<I, S>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut removed = 0;
        for id in ids {
            if let Some(idx) = self.index.remove(id.as_ref()) {
                if self.graph.remove_node(idx).is_some() {
                    removed += 1;
                }
            }
        }

        #[cfg(debug_assertions)]
        self.assert_consistency();

        removed
    }

    /// Removes every edge for which `doomed(from, to, relation)` is true.
    /// Nodes are untouched. Returns the number of edges removed.
    pub fn remove_edges<F>(&mut self, mut doomed: F) -> usize
    where
        F: FnMut(&EntityId, &EntityId, &Relation) -> bool,
    {
        let victims: Vec<EdgeIndex<u32>> = self
            .graph
            .edge_references()
            .filter(|e| {
                doomed(
                    &self.graph[e.source()].id,
                    &self.graph[e.target()].id,
                    e.weight(),
                )
            })
            .map(|e| e.id())
            .collect();

        let mut removed = 0;
        for edge in victims {
            if self.graph.remove_edge(edge).is_some() {
                removed += 1;
            }
        }
        removed
    }

    // -----------------------------------------------------------------------
    // Derived graphs
    // -----------------------------------------------------------------------

    /// Returns an independent copy with every edge reversed. Node records and
    /// relation labels are preserved.
    pub fn reverse(&self) -> OntologyGraph {
        let mut reversed = OntologyGraph::new();
        let mut remap: HashMap<NodeIndex<u32>, NodeIndex<u32>> = HashMap::new();
        for idx in self.graph.node_indices() {
            let node = self.graph[idx].clone();
            let id = node.id.clone();
            let new_idx = reversed.graph.add_node(node);
            reversed.index.insert(id, new_idx);
            remap.insert(idx, new_idx);
        }
        for e in self.graph.edge_references() {
            let from = remap[&e.target()];
            let to = remap[&e.source()];
            reversed.graph.add_edge(from, to, e.weight().clone());
        }
        reversed
    }

    /// Builds the subgraph induced by `members`: those nodes plus every edge
    /// of this graph between two of them, directions unchanged.
    pub(crate) fn induced_subgraph(&self, members: &[NodeIndex<u32>]) -> OntologyGraph {
        let mut sub = OntologyGraph::new();
        let mut remap: HashMap<NodeIndex<u32>, NodeIndex<u32>> = HashMap::new();
        for &idx in members {
            if remap.contains_key(&idx) {
                continue;
            }
            if let Some(node) = self.graph.node_weight(idx) {
                let new_idx = sub.graph.add_node(node.clone());
                sub.index.insert(node.id.clone(), new_idx);
                remap.insert(idx, new_idx);
            }
        }
        for e in self.graph.edge_references() {
            if let (Some(&a), Some(&b)) = (remap.get(&e.source()), remap.get(&e.target())) {
                sub.graph.add_edge(a, b, e.weight().clone());
            }
        }
        sub
    }

    // -----------------------------------------------------------------------
    // Debug consistency assertion
    // -----------------------------------------------------------------------

    /// Verifies that the id index and the graph describe the same node set.
    ///
    /// Only called in debug builds (via `cfg(debug_assertions)`).
    #[cfg(debug_assertions)]
    fn assert_consistency(&self) {
        assert_eq!(
            self.index.len(),
            self.graph.node_count(),
            "id index and graph disagree on node count"
        );
        for (id, &idx) in &self.index {
            let node = self
                .graph
                .node_weight(idx)
                .unwrap_or_else(|| panic!("id {} maps to a removed node", id));
            assert_eq!(&node.id, id, "id index points at the wrong node");
        }
    }
}
