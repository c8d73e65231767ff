//! Node types for the food graphs.

use serde::{Deserialize, Serialize};

/// The namespace a node's name lives in.
///
/// Node identity is the pair (kind, label): a recipe and an ingredient may
/// legally share the same name without colliding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Recipe,
    Ingredient,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Recipe => "recipe",
            Self::Ingredient => "ingredient",
        };
        write!(f, "{}", s)
    }
}

/// A node in one of the food graphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    pub label: String,
}

impl Node {
    pub fn recipe(label: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Recipe,
            label: label.into(),
        }
    }

    pub fn ingredient(label: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Ingredient,
            label: label.into(),
        }
    }
}
