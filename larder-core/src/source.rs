//! Record sources: where recipe records come from.
//!
//! The builder traverses the record list several times, so a source
//! produces a fully materialized `Vec<RecipeRecord>` rather than a
//! one-shot iterator. Every source validates the records it hands out.

use crate::error::Result;
use crate::record::{AttrValue, IngredientEntry, RecipeRecord};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supplies recipe records to the graph builder.
pub trait RecordSource {
    /// Produces the full, validated record list. May be called more than
    /// once; each call returns the same logical records.
    fn records(&self) -> Result<Vec<RecipeRecord>>;
}

/// A source backed by an already materialized record list.
pub struct InMemorySource {
    records: Vec<RecipeRecord>,
}

impl InMemorySource {
    pub fn new(records: Vec<RecipeRecord>) -> Self {
        Self { records }
    }
}

impl RecordSource for InMemorySource {
    fn records(&self) -> Result<Vec<RecipeRecord>> {
        for record in &self.records {
            record.validate()?;
        }
        Ok(self.records.clone())
    }
}

/// Raw JSON shape of one ingredient line.
#[derive(Debug, Deserialize)]
struct RawEntry {
    name: String,
    #[serde(default)]
    variants: Vec<usize>,
    #[serde(flatten)]
    attributes: BTreeMap<String, serde_json::Value>,
}

/// Raw JSON shape of one recipe.
#[derive(Debug, Deserialize)]
struct RawRecipe {
    name: String,
    ingredients: Vec<RawEntry>,
}

/// A source reading a keyed JSON collection of recipes:
/// `{ "<key>": { "name": ..., "ingredients": [{ "name": ..., "variants": [...] }] } }`.
///
/// Entry fields beyond `name`/`variants` are kept as descriptive
/// attributes when they are strings, numbers or booleans; anything else
/// is dropped.
pub struct JsonRecordSource {
    path: PathBuf,
}

impl JsonRecordSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RecordSource for JsonRecordSource {
    fn records(&self) -> Result<Vec<RecipeRecord>> {
        let reader = BufReader::new(File::open(&self.path)?);
        // BTreeMap keeps record order stable across calls.
        let raw: BTreeMap<String, RawRecipe> = serde_json::from_reader(reader)?;

        let mut records = Vec::with_capacity(raw.len());
        for recipe in raw.into_values() {
            let ingredients = recipe.ingredients.into_iter().map(convert_entry).collect();
            let record = RecipeRecord::new(recipe.name, ingredients);
            record.validate()?;
            records.push(record);
        }

        debug!(path = %self.path.display(), count = records.len(), "loaded recipe records");
        Ok(records)
    }
}

fn convert_entry(raw: RawEntry) -> IngredientEntry {
    let mut entry = IngredientEntry::new(raw.name).with_group(raw.variants);
    for (key, value) in raw.attributes {
        let attr = match value {
            serde_json::Value::String(s) => AttrValue::Text(s),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => AttrValue::Number(f),
                None => continue,
            },
            serde_json::Value::Bool(b) => AttrValue::Flag(b),
            _ => continue,
        };
        entry.attributes.insert(key, attr);
    }
    entry
}
