//! Core graph data structure.
//!
//! `FoodGraph` wraps an undirected petgraph graph and adds a name index
//! for fast lookups. The same shape backs all three graphs (membership,
//! correlation, substitution); only the node/edge population differs.

use crate::edge::{Edge, EdgeRecord, NodeRecord};
use crate::node::{Node, NodeKind};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a node in the graph.
pub type NodeId = NodeIndex;

/// An undirected attributed graph over recipes and ingredients.
///
/// Graphs are mutated only while the builder runs; afterwards they are
/// held read-only for the lifetime of the query session.
#[derive(Debug, Serialize, Deserialize)]
pub struct FoodGraph {
    /// The underlying petgraph graph.
    graph: UnGraph<Node, Edge>,

    /// Maps (namespace, name) to graph node indexes.
    id_index: HashMap<(NodeKind, String), NodeId>,
}

impl Default for FoodGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl FoodGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            id_index: HashMap::new(),
        }
    }

    /// Adds a node, returning its index.
    ///
    /// Insertion is idempotent: re-adding a (kind, label) pair that is
    /// already present returns the existing index unchanged.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let key = (node.kind, node.label.clone());
        if let Some(&index) = self.id_index.get(&key) {
            return index;
        }
        let index = self.graph.add_node(node);
        self.id_index.insert(key, index);
        index
    }

    /// Adds an edge between two nodes. Parallel edges are allowed; the
    /// membership graph uses this to keep one edge per ingredient entry.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, edge: Edge) {
        self.graph.add_edge(a, b, edge);
    }

    /// Adds an edge, replacing an existing edge between the same pair.
    /// Last write wins.
    pub fn update_edge(&mut self, a: NodeId, b: NodeId, edge: Edge) {
        self.graph.update_edge(a, b, edge);
    }

    /// Gets the edge between two nodes, if any.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
        let edge_idx = self.graph.find_edge(a, b)?;
        self.graph.edge_weight(edge_idx)
    }

    /// Gets the node index for a (namespace, name) pair.
    pub fn index_of(&self, kind: NodeKind, name: &str) -> Option<NodeId> {
        self.id_index.get(&(kind, name.to_string())).copied()
    }

    /// Whether a (namespace, name) pair is present.
    pub fn contains(&self, kind: NodeKind, name: &str) -> bool {
        self.index_of(kind, name).is_some()
    }

    /// Gets a node by its graph index.
    pub fn node(&self, index: NodeId) -> Option<&Node> {
        self.graph.node_weight(index)
    }

    /// Iterates over the neighbors of a named node. Empty if the node is
    /// absent or isolated.
    pub fn neighbors_of<'a>(
        &'a self,
        kind: NodeKind,
        name: &str,
    ) -> impl Iterator<Item = &'a Node> + 'a {
        self.index_of(kind, name)
            .into_iter()
            .flat_map(move |index| {
                self.graph
                    .neighbors(index)
                    .filter_map(move |idx| self.graph.node_weight(idx))
            })
    }

    /// Iterates over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// Iterates over all nodes in one namespace.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.graph.node_weights().filter(move |n| n.kind == kind)
    }

    /// Iterates over all edges.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.edge_weights()
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Exports the graph as flat node/edge lists for persistence.
    pub fn export(&self) -> (Vec<NodeRecord>, Vec<EdgeRecord>) {
        let nodes = self
            .graph
            .node_weights()
            .map(|node| NodeRecord {
                id: node.label.clone(),
                kind: node.kind,
                label: node.label.clone(),
            })
            .collect();

        let edges = self
            .graph
            .edge_references()
            .map(|edge_ref| {
                let source = &self.graph[edge_ref.source()];
                let target = &self.graph[edge_ref.target()];
                let weight = edge_ref.weight();
                // Persisted (source, target) order follows the edge kind's
                // endpoint convention.
                let (source_kind, _) = weight.kind.endpoints();
                let (source, target) = if source.kind == source_kind {
                    (source, target)
                } else {
                    (target, source)
                };
                EdgeRecord {
                    source: source.label.clone(),
                    target: target.label.clone(),
                    kind: weight.kind,
                    weight: weight.weight,
                    attrs: weight.attrs.clone(),
                }
            })
            .collect();

        (nodes, edges)
    }

    /// Serializes the flat node/edge lists as a JSON document, for
    /// inspection and presentation-layer collaborators.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let (nodes, edges) = self.export();
        serde_json::to_string_pretty(&serde_json::json!({
            "nodes": nodes,
            "edges": edges,
        }))
    }

    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
        }
    }
}

/// Graph statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
}

/// The three graphs derived from one record set.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GraphSet {
    /// Recipes linked to their constituent ingredients.
    pub membership: FoodGraph,
    /// Ingredients linked by co-occurrence strength (PMI).
    pub correlation: FoodGraph,
    /// Ingredients explicitly marked interchangeable within a recipe.
    pub substitution: FoodGraph,
}

impl GraphSet {
    /// Creates an empty graph set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns statistics for the three graphs, in
    /// (membership, correlation, substitution) order.
    pub fn stats(&self) -> (GraphStats, GraphStats, GraphStats) {
        (
            self.membership.stats(),
            self.correlation.stats(),
            self.substitution.stats(),
        )
    }
}
