//! Persistence for the food graphs.
//!
//! Each graph is stored independently as a versioned flat node/edge list,
//! serialized with bincode into a sled database. Queries never touch the
//! store; they only care that `load(save(g))` reproduces `g`'s node set,
//! edge set and attribute values.

use crate::edge::{Edge, EdgeRecord, NodeRecord};
use crate::graph::{FoodGraph, GraphSet};
use crate::node::Node;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Bumped whenever the persisted layout changes.
const FORMAT_VERSION: u32 = 1;

/// Which of the three graphs a store operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    Membership,
    Correlation,
    Substitution,
}

impl GraphKind {
    fn key(&self) -> &'static str {
        match self {
            Self::Membership => "membership",
            Self::Correlation => "correlation",
            Self::Substitution => "substitution",
        }
    }
}

impl std::fmt::Display for GraphKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sled(#[from] sled::Error),

    #[error("serialization error: {0}")]
    Encode(#[from] bincode::Error),

    /// No graph of this kind has been saved at this path.
    #[error("no stored {0} graph")]
    NotFound(GraphKind),

    /// The stored bytes are not a graph in the expected layout.
    #[error("stored {kind} graph is not in the expected format: {reason}")]
    FormatMismatch { kind: GraphKind, reason: String },
}

/// The persisted form of one graph.
#[derive(Serialize, Deserialize)]
struct GraphFile {
    version: u32,
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
}

/// Saves and loads food graphs, one keyed entry per graph kind.
pub struct GraphStore {
    db: sled::Db,
}

impl GraphStore {
    /// Opens or creates a graph store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Saves one graph, replacing any previous snapshot of its kind.
    pub fn save(&self, kind: GraphKind, graph: &FoodGraph) -> Result<(), StoreError> {
        let (nodes, edges) = graph.export();
        let file = GraphFile {
            version: FORMAT_VERSION,
            nodes,
            edges,
        };
        let bytes = bincode::serialize(&file)?;
        self.db.insert(kind.key(), bytes)?;
        self.db.flush()?;
        debug!(kind = %kind, nodes = file.nodes.len(), edges = file.edges.len(), "graph saved");
        Ok(())
    }

    /// Loads one graph. Fails with [`StoreError::NotFound`] if no graph
    /// of this kind was saved, [`StoreError::FormatMismatch`] if the
    /// stored bytes do not decode to the expected layout.
    pub fn load(&self, kind: GraphKind) -> Result<FoodGraph, StoreError> {
        let bytes = self.db.get(kind.key())?.ok_or(StoreError::NotFound(kind))?;
        decode(kind, &bytes)
    }

    /// Saves all three graphs of a set.
    pub fn save_set(&self, set: &GraphSet) -> Result<(), StoreError> {
        self.save(GraphKind::Membership, &set.membership)?;
        self.save(GraphKind::Correlation, &set.correlation)?;
        self.save(GraphKind::Substitution, &set.substitution)?;
        Ok(())
    }

    /// Loads all three graphs into a set.
    pub fn load_set(&self) -> Result<GraphSet, StoreError> {
        Ok(GraphSet {
            membership: self.load(GraphKind::Membership)?,
            correlation: self.load(GraphKind::Correlation)?,
            substitution: self.load(GraphKind::Substitution)?,
        })
    }

    /// Removes every stored graph.
    pub fn clear(&self) -> Result<(), StoreError> {
        for kind in [
            GraphKind::Membership,
            GraphKind::Correlation,
            GraphKind::Substitution,
        ] {
            self.db.remove(kind.key())?;
        }
        self.db.flush()?;
        Ok(())
    }
}

/// Rebuilds a graph from its flat-list form. Edge endpoints resolve to
/// the namespaces implied by the edge kind.
fn decode(kind: GraphKind, bytes: &[u8]) -> Result<FoodGraph, StoreError> {
    let file: GraphFile =
        bincode::deserialize(bytes).map_err(|e| StoreError::FormatMismatch {
            kind,
            reason: e.to_string(),
        })?;
    if file.version != FORMAT_VERSION {
        return Err(StoreError::FormatMismatch {
            kind,
            reason: format!(
                "format version {} (expected {})",
                file.version, FORMAT_VERSION
            ),
        });
    }

    let mut graph = FoodGraph::new();
    for node in file.nodes {
        graph.add_node(Node {
            kind: node.kind,
            label: node.label,
        });
    }
    for edge in file.edges {
        let (source_kind, target_kind) = edge.kind.endpoints();
        let a = graph.index_of(source_kind, &edge.source).ok_or_else(|| {
            StoreError::FormatMismatch {
                kind,
                reason: format!("edge references unknown node `{}`", edge.source),
            }
        })?;
        let b = graph.index_of(target_kind, &edge.target).ok_or_else(|| {
            StoreError::FormatMismatch {
                kind,
                reason: format!("edge references unknown node `{}`", edge.target),
            }
        })?;
        graph.add_edge(
            a,
            b,
            Edge {
                kind: edge.kind,
                weight: edge.weight,
                attrs: edge.attrs,
            },
        );
    }
    Ok(graph)
}
