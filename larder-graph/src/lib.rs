//! Larder Graph - Culinary relationship management
//!
//! This crate derives three graphs from a recipe record list and answers
//! substitution and recipe-discovery queries over them:
//!
//! - membership: recipes linked to their constituent ingredients
//! - correlation: ingredients linked by co-occurrence strength (PMI)
//! - substitution: ingredients marked interchangeable within a recipe
//!
//! Graphs are built once (or loaded from a [`GraphStore`] snapshot) and
//! held read-only for the lifetime of the query session.
//!
//! # Example
//!
//! ```
//! use larder_core::{IngredientEntry, RecipeRecord};
//! use larder_graph::GraphBuilder;
//!
//! let records = vec![
//!     RecipeRecord::new(
//!         "soup",
//!         vec![
//!             IngredientEntry::new("salt").with_group([0, 1]),
//!             IngredientEntry::new("pepper").with_group([0, 1]),
//!         ],
//!     ),
//!     RecipeRecord::new("stew", vec![IngredientEntry::new("salt")]),
//! ];
//!
//! let graphs = GraphBuilder::new().build(&records).unwrap();
//! assert_eq!(graphs.substitutes_for("pepper").unwrap(), vec!["salt"]);
//! ```

mod builder;
mod edge;
mod error;
mod graph;
mod node;
mod query;
mod scoring;
mod store;

pub use builder::{GraphBuilder, SubstitutionWeighting};
pub use edge::{Edge, EdgeKind, EdgeRecord, NodeRecord};
pub use error::{GraphError, Result};
pub use graph::{FoodGraph, GraphSet, GraphStats, NodeId};
pub use node::{Node, NodeKind};
pub use query::RecipeMatch;
pub use scoring::{pointwise_mutual_information, OccurrenceSets};
pub use store::{GraphKind, GraphStore, StoreError};
