//! Bounded-depth neighborhood extraction.
//!
//! A neighborhood is the subgraph induced by every node within `depth` hops
//! of a root under a [`Traversal`] policy. Traversal never mutates or copies
//! the source graph: following incoming edges is the same as walking the
//! reversed graph, and the returned subgraph keeps the original edge
//! directions.

use std::collections::{HashSet, VecDeque};

use petgraph::graph::NodeIndex;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::graph::OntologyGraph;
use crate::id::EntityId;

/// Which edges a traversal may follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Traversal {
    /// Follow edges from source to target.
    Outgoing,
    /// Follow edges from target to source: finds the nodes from which the
    /// root is reachable.
    Incoming,
    /// Follow edges in either direction.
    Both,
}

impl Traversal {
    /// Maps the `(undirected, reversed)` flag pair onto a policy.
    /// `undirected` wins over `reversed`.
    pub fn from_flags(undirected: bool, reversed: bool) -> Self {
        match (undirected, reversed) {
            (true, _) => Traversal::Both,
            (false, true) => Traversal::Incoming,
            (false, false) => Traversal::Outgoing,
        }
    }
}

/// Collects the indices of every node within `depth` hops of `root`, in
/// breadth-first discovery order, root first.
fn reach(
    graph: &OntologyGraph,
    root: &str,
    depth: usize,
    traversal: Traversal,
) -> Result<Vec<NodeIndex<u32>>, CoreError> {
    let start = graph
        .index_of(root)
        .ok_or_else(|| CoreError::NodeNotFound { id: root.into() })?;
    let topology = graph.topology();

    let mut seen: HashSet<NodeIndex<u32>> = HashSet::new();
    let mut order = vec![start];
    let mut queue: VecDeque<(NodeIndex<u32>, usize)> = VecDeque::new();
    seen.insert(start);
    queue.push_back((start, 0));

    while let Some((current, hops)) = queue.pop_front() {
        if hops >= depth {
            continue;
        }
        let next: Vec<NodeIndex<u32>> = match traversal {
            Traversal::Outgoing => topology
                .neighbors_directed(current, Direction::Outgoing)
                .collect(),
            Traversal::Incoming => topology
                .neighbors_directed(current, Direction::Incoming)
                .collect(),
            Traversal::Both => topology.neighbors_undirected(current).collect(),
        };
        for neighbor in next {
            if seen.insert(neighbor) {
                order.push(neighbor);
                queue.push_back((neighbor, hops + 1));
            }
        }
    }

    Ok(order)
}

/// Returns the induced neighborhood of `root` under `traversal`.
///
/// `depth == 0` yields the root alone. Fails with
/// [`CoreError::NodeNotFound`] if the root is absent.
pub fn neighborhood(
    graph: &OntologyGraph,
    root: &str,
    depth: usize,
    traversal: Traversal,
) -> Result<OntologyGraph, CoreError> {
    let members = reach(graph, root, depth, traversal)?;
    Ok(graph.induced_subgraph(&members))
}

/// Flag-based form of [`neighborhood`].
///
/// With `reversed` set the result holds the nodes from which `root` is
/// reachable; with `undirected` set direction is ignored altogether.
pub fn extract_neighborhood(
    graph: &OntologyGraph,
    root: &str,
    depth: usize,
    undirected: bool,
    reversed: bool,
) -> Result<OntologyGraph, CoreError> {
    neighborhood(graph, root, depth, Traversal::from_flags(undirected, reversed))
}

/// Ids of the nodes in the neighborhood of `root`, root first, in
/// breadth-first order.
pub fn get_group(
    graph: &OntologyGraph,
    root: &str,
    depth: usize,
    traversal: Traversal,
) -> Result<Vec<EntityId>, CoreError> {
    let members = reach(graph, root, depth, traversal)?;
    let topology = graph.topology();
    Ok(members
        .into_iter()
        .map(|idx| topology[idx].id.clone())
        .collect())
}
