//! Read-only queries over a built or loaded graph set.

use crate::error::{GraphError, Result};
use crate::graph::GraphSet;
use crate::node::NodeKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A recipe matched by [`GraphSet::recipes_containing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeMatch {
    pub recipe: String,
    /// How many of the queried ingredients the recipe contains.
    pub matches: usize,
}

impl GraphSet {
    /// Lists the ingredients marked interchangeable with `ingredient`,
    /// sorted by name.
    ///
    /// Returns an empty list for an ingredient the model knows but has no
    /// substitutes for; fails with [`GraphError::IngredientNotFound`] for
    /// an ingredient absent from the model.
    pub fn substitutes_for(&self, ingredient: &str) -> Result<Vec<String>> {
        if !self.substitution.contains(NodeKind::Ingredient, ingredient) {
            return Err(GraphError::IngredientNotFound(ingredient.to_string()));
        }

        let mut names: Vec<String> = self
            .substitution
            .neighbors_of(NodeKind::Ingredient, ingredient)
            .map(|node| node.label.clone())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Finds recipes containing any of the given ingredients.
    ///
    /// Recipes matching none are excluded. Results are ordered by
    /// descending match count, ties broken by recipe name ascending.
    pub fn recipes_containing(&self, ingredients: &HashSet<String>) -> Vec<RecipeMatch> {
        let mut results = Vec::new();

        for recipe in self.membership.nodes_of_kind(NodeKind::Recipe) {
            let neighbors: HashSet<&str> = self
                .membership
                .neighbors_of(NodeKind::Recipe, &recipe.label)
                .map(|node| node.label.as_str())
                .collect();
            let matches = ingredients
                .iter()
                .filter(|name| neighbors.contains(name.as_str()))
                .count();
            if matches > 0 {
                results.push(RecipeMatch {
                    recipe: recipe.label.clone(),
                    matches,
                });
            }
        }

        results.sort_by(|a, b| b.matches.cmp(&a.matches).then_with(|| a.recipe.cmp(&b.recipe)));
        results
    }
}
