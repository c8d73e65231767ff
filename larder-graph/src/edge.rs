//! Edge types for the food graphs.
//!
//! Each graph carries a single edge kind; the kind still travels on every
//! edge so the persisted flat lists stay self-describing.

use crate::node::NodeKind;
use larder_core::AttrValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The relationship an edge expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// A recipe lists an ingredient.
    Membership,

    /// Two ingredients co-occur in at least one recipe; weighted by PMI.
    Correlation,

    /// Two ingredients are marked interchangeable within some recipe.
    Substitution,
}

impl EdgeKind {
    /// The node namespaces an edge of this kind connects, in
    /// (source, target) order as persisted.
    pub fn endpoints(&self) -> (NodeKind, NodeKind) {
        match self {
            Self::Membership => (NodeKind::Recipe, NodeKind::Ingredient),
            Self::Correlation | Self::Substitution => (NodeKind::Ingredient, NodeKind::Ingredient),
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Membership => "recipe-ingredient membership",
            Self::Correlation => "ingredient-ingredient correlation",
            Self::Substitution => "ingredient-ingredient substitution",
        };
        write!(f, "{}", s)
    }
}

/// An edge in a food graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// The kind of relationship.
    pub kind: EdgeKind,

    /// Edge weight: 1 for membership and substitution edges, the PMI
    /// value for correlation edges.
    pub weight: f64,

    /// Extra attributes (recognized entry metadata on membership edges,
    /// the raw PMI value on correlation edges).
    pub attrs: BTreeMap<String, AttrValue>,
}

impl Edge {
    /// Creates an edge with no extra attributes.
    pub fn new(kind: EdgeKind, weight: f64) -> Self {
        Self {
            kind,
            weight,
            attrs: BTreeMap::new(),
        }
    }

    /// Adds an extra attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }
}

/// A node row in the persisted flat-list form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
}

/// An edge row in the persisted flat-list form. Endpoint namespaces are
/// implied by the edge kind (see [`EdgeKind::endpoints`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub weight: f64,
    pub attrs: BTreeMap<String, AttrValue>,
}
