//! Recipe records as supplied by a record source.
//!
//! A record is immutable once read: the graph builder only ever borrows
//! the materialized record list, so nothing here exposes mutation beyond
//! the construction helpers.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// An attribute value carried by an ingredient entry.
///
/// The persisted wire format only allows strings and numbers; the
/// optional-flag on entries is the one boolean we care about, so it gets
/// its own variant rather than being smuggled through a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Number(n)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Flag(b)
    }
}

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientEntry {
    /// The ingredient name. Node identity in the graphs.
    pub name: String,

    /// Positions (into the owning recipe's ingredient list, self included)
    /// of entries that are mutually interchangeable within that recipe.
    /// Empty or singleton groups carry no substitution information.
    pub substitution_group: BTreeSet<usize>,

    /// Descriptive attributes (quantity, unit, form, optional flag, ...).
    /// The graph layer filters these down to the keys it recognizes.
    pub attributes: BTreeMap<String, AttrValue>,
}

impl IngredientEntry {
    /// Creates a bare entry with no substitution group and no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            substitution_group: BTreeSet::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// Sets the substitution group.
    pub fn with_group(mut self, group: impl IntoIterator<Item = usize>) -> Self {
        self.substitution_group = group.into_iter().collect();
        self
    }

    /// Adds a descriptive attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// A recipe: a name plus its ordered ingredient entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub name: String,
    pub ingredients: Vec<IngredientEntry>,
}

impl RecipeRecord {
    /// Creates a record from a name and its entries.
    pub fn new(name: impl Into<String>, ingredients: Vec<IngredientEntry>) -> Self {
        Self {
            name: name.into(),
            ingredients,
        }
    }

    /// Checks the record invariant: every substitution index must be a
    /// valid offset into this recipe's ingredient list.
    pub fn validate(&self) -> Result<()> {
        let len = self.ingredients.len();
        for entry in &self.ingredients {
            for &index in &entry.substitution_group {
                if index >= len {
                    return Err(CoreError::SubstitutionIndexOutOfRange {
                        recipe: self.name.clone(),
                        index,
                        len,
                    });
                }
            }
        }
        Ok(())
    }
}
