//! Larder Core - Recipe record model
//!
//! This crate defines the recipe records consumed by the graph layer and
//! the sources that supply them. A record source hands the builder a fully
//! materialized list of records so the builder can traverse it as many
//! times as it needs.
//!
//! # Example
//!
//! ```
//! use larder_core::{IngredientEntry, RecipeRecord};
//!
//! let record = RecipeRecord::new(
//!     "soup",
//!     vec![
//!         IngredientEntry::new("salt").with_group([0, 1]),
//!         IngredientEntry::new("pepper").with_group([0, 1]),
//!     ],
//! );
//! assert!(record.validate().is_ok());
//! ```

mod error;
mod record;
mod source;

pub use error::{CoreError, Result};
pub use record::{AttrValue, IngredientEntry, RecipeRecord};
pub use source::{InMemorySource, JsonRecordSource, RecordSource};
