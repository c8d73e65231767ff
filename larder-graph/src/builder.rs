//! Graph builder: turns a recipe record list into the three food graphs.
//!
//! The passes are independent of each other's output and each traverse
//! the same materialized record slice:
//!
//! 1. Node creation: recipe and ingredient nodes in every graph.
//! 2. Correlation: occurrence sets, then PMI over all unordered
//!    ingredient pairs.
//! 3. Substitution: consumed-marker walk over each recipe's groups.
//! 4. Membership: one recipe-ingredient edge per entry.

use crate::edge::{Edge, EdgeKind};
use crate::error::{GraphError, Result};
use crate::graph::{FoodGraph, GraphSet};
use crate::node::Node;
use crate::scoring::{pointwise_mutual_information, OccurrenceSets};
use larder_core::RecipeRecord;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info};

/// Entry attribute keys copied onto membership edges. Anything else in
/// an entry's attribute bag is dropped.
const RECOGNIZED_ATTR_KEYS: [&str; 4] = ["optional", "quantity", "unit", "form"];

/// How repeated identical substitution groups contribute to edge weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubstitutionWeighting {
    /// Identical name sets are deduplicated across the whole dataset and
    /// every edge carries weight 1.
    #[default]
    Constant,

    /// Every occurrence of a pair bumps its edge weight by 1.
    Accumulate,
}

/// Builds a [`GraphSet`] from recipe records.
pub struct GraphBuilder {
    substitution_weighting: SubstitutionWeighting,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Creates a builder with the default (constant) substitution policy.
    pub fn new() -> Self {
        Self {
            substitution_weighting: SubstitutionWeighting::Constant,
        }
    }

    /// Selects the substitution weighting policy.
    pub fn with_substitution_weighting(mut self, weighting: SubstitutionWeighting) -> Self {
        self.substitution_weighting = weighting;
        self
    }

    /// Builds the membership, correlation and substitution graphs.
    ///
    /// Records are assumed well-formed; an out-of-range substitution
    /// index surfaces as [`GraphError::SubstitutionIndexOutOfRange`].
    pub fn build(&self, records: &[RecipeRecord]) -> Result<GraphSet> {
        let mut set = GraphSet::new();

        self.add_nodes(records, &mut set);
        self.build_correlation(records, &mut set.correlation)?;
        self.build_substitution(records, &mut set.substitution)?;
        self.build_membership(records, &mut set.membership);

        let (membership, correlation, substitution) = set.stats();
        info!(
            recipes = records.len(),
            membership_edges = membership.edge_count,
            correlation_edges = correlation.edge_count,
            substitution_edges = substitution.edge_count,
            "graph build complete"
        );
        Ok(set)
    }

    /// Pass 1: recipe nodes in the membership graph, ingredient nodes in
    /// all three graphs.
    fn add_nodes(&self, records: &[RecipeRecord], set: &mut GraphSet) {
        for record in records {
            set.membership.add_node(Node::recipe(&record.name));
            for entry in &record.ingredients {
                set.membership.add_node(Node::ingredient(&entry.name));
                set.correlation.add_node(Node::ingredient(&entry.name));
                set.substitution.add_node(Node::ingredient(&entry.name));
            }
        }
        debug!(
            ingredients = set.correlation.node_count(),
            "node creation pass done"
        );
    }

    /// Pass 2: PMI-weighted correlation edges over all unordered pairs.
    /// O(I^2) in distinct ingredient count; vocabularies are small
    /// relative to recipe counts.
    fn build_correlation(&self, records: &[RecipeRecord], graph: &mut FoodGraph) -> Result<()> {
        let (occurrences, n_docs) = occurrence_sets(records);

        // Sorted so edge insertion order is stable run to run.
        let mut names: Vec<&String> = occurrences.keys().collect();
        names.sort();

        for (i, x) in names.iter().enumerate() {
            for y in &names[i + 1..] {
                let Some(value) =
                    pointwise_mutual_information(x.as_str(), y.as_str(), &occurrences, n_docs)?
                else {
                    continue;
                };
                let a = graph.add_node(Node::ingredient(x.as_str()));
                let b = graph.add_node(Node::ingredient(y.as_str()));
                let edge = Edge::new(EdgeKind::Correlation, value)
                    .with_attr("value", value)
                    .with_attr("label", EdgeKind::Correlation.to_string().as_str());
                graph.update_edge(a, b, edge);
            }
        }

        debug!(edges = graph.edge_count(), "correlation pass done");
        Ok(())
    }

    /// Pass 3: substitution edges from per-recipe interchange groups.
    fn build_substitution(&self, records: &[RecipeRecord], graph: &mut FoodGraph) -> Result<()> {
        let mut relations: Vec<BTreeSet<String>> = Vec::new();

        for record in records {
            let len = record.ingredients.len();
            let mut consumed = vec![false; len];

            for (i, entry) in record.ingredients.iter().enumerate() {
                if consumed[i] || entry.substitution_group.len() <= 1 {
                    continue;
                }
                let mut names = BTreeSet::new();
                for &index in &entry.substitution_group {
                    let sibling = record.ingredients.get(index).ok_or_else(|| {
                        GraphError::SubstitutionIndexOutOfRange {
                            recipe: record.name.clone(),
                            index,
                            len,
                        }
                    })?;
                    names.insert(sibling.name.clone());
                    consumed[index] = true;
                }
                relations.push(names);
            }
        }

        if self.substitution_weighting == SubstitutionWeighting::Constant {
            // Identical name sets across the dataset count once.
            let mut seen = BTreeSet::new();
            relations.retain(|relation| seen.insert(relation.clone()));
        }

        for relation in &relations {
            let names: Vec<&String> = relation.iter().collect();
            for (i, x) in names.iter().enumerate() {
                for y in &names[i + 1..] {
                    let a = graph.add_node(Node::ingredient(x.as_str()));
                    let b = graph.add_node(Node::ingredient(y.as_str()));
                    let weight = match self.substitution_weighting {
                        SubstitutionWeighting::Constant => 1.0,
                        SubstitutionWeighting::Accumulate => {
                            graph.edge_between(a, b).map_or(0.0, |e| e.weight) + 1.0
                        }
                    };
                    let edge = Edge::new(EdgeKind::Substitution, weight)
                        .with_attr("label", EdgeKind::Substitution.to_string().as_str());
                    graph.update_edge(a, b, edge);
                }
            }
        }

        debug!(edges = graph.edge_count(), "substitution pass done");
        Ok(())
    }

    /// Pass 4: one membership edge per ingredient entry, carrying the
    /// recognized entry attributes.
    fn build_membership(&self, records: &[RecipeRecord], graph: &mut FoodGraph) {
        for record in records {
            let recipe = graph.add_node(Node::recipe(&record.name));
            for entry in &record.ingredients {
                let ingredient = graph.add_node(Node::ingredient(&entry.name));
                let mut edge = Edge::new(EdgeKind::Membership, 1.0);
                for key in RECOGNIZED_ATTR_KEYS {
                    if let Some(value) = entry.attributes.get(key) {
                        edge.attrs.insert(key.to_string(), value.clone());
                    }
                }
                graph.add_edge(recipe, ingredient, edge);
            }
        }
        debug!(edges = graph.edge_count(), "membership pass done");
    }
}

/// Builds the ingredient -> recipe-set map and counts distinct recipes.
fn occurrence_sets(records: &[RecipeRecord]) -> (OccurrenceSets, usize) {
    let mut occurrences = OccurrenceSets::new();
    let mut recipes = HashSet::new();

    for record in records {
        recipes.insert(record.name.as_str());
        for entry in &record.ingredients {
            occurrences
                .entry(entry.name.clone())
                .or_default()
                .insert(record.name.clone());
        }
    }

    (occurrences, recipes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use larder_core::IngredientEntry;

    fn soup_and_stew() -> Vec<RecipeRecord> {
        vec![
            RecipeRecord::new(
                "soup",
                vec![
                    IngredientEntry::new("salt").with_group([0, 1]),
                    IngredientEntry::new("pepper").with_group([0, 1]),
                ],
            ),
            RecipeRecord::new("stew", vec![IngredientEntry::new("salt")]),
        ]
    }

    #[test]
    fn test_node_creation_covers_all_graphs() {
        let set = GraphBuilder::new().build(&soup_and_stew()).unwrap();

        // 2 recipes + 2 ingredients in membership, 2 ingredients elsewhere.
        assert_eq!(set.membership.node_count(), 4);
        assert_eq!(set.correlation.node_count(), 2);
        assert_eq!(set.substitution.node_count(), 2);
        assert!(set.correlation.contains(NodeKind::Ingredient, "pepper"));
    }

    #[test]
    fn test_membership_edge_per_entry() {
        let set = GraphBuilder::new().build(&soup_and_stew()).unwrap();
        // 3 ingredient entries across the two records.
        assert_eq!(set.membership.edge_count(), 3);
    }

    #[test]
    fn test_correlation_uses_pmi() {
        let set = GraphBuilder::new().build(&soup_and_stew()).unwrap();

        // salt in both recipes, pepper in one, co-occurring once:
        // log2((1*2)/(2*1)) = 0.0 -- zero PMI still makes an edge.
        assert_eq!(set.correlation.edge_count(), 1);
        let a = set
            .correlation
            .index_of(NodeKind::Ingredient, "salt")
            .unwrap();
        let b = set
            .correlation
            .index_of(NodeKind::Ingredient, "pepper")
            .unwrap();
        assert_eq!(set.correlation.edge_between(a, b).unwrap().weight, 0.0);
    }

    #[test]
    fn test_no_correlation_edge_without_co_occurrence() {
        let records = vec![
            RecipeRecord::new("soup", vec![IngredientEntry::new("salt")]),
            RecipeRecord::new("cake", vec![IngredientEntry::new("sugar")]),
        ];
        let set = GraphBuilder::new().build(&records).unwrap();
        assert_eq!(set.correlation.edge_count(), 0);
    }

    #[test]
    fn test_substitution_group_makes_edges() {
        let set = GraphBuilder::new().build(&soup_and_stew()).unwrap();
        assert_eq!(set.substitution.edge_count(), 1);

        let a = set
            .substitution
            .index_of(NodeKind::Ingredient, "salt")
            .unwrap();
        let b = set
            .substitution
            .index_of(NodeKind::Ingredient, "pepper")
            .unwrap();
        assert_eq!(set.substitution.edge_between(a, b).unwrap().weight, 1.0);
    }

    #[test]
    fn test_no_self_substitution_edge() {
        // Same name at both group positions collapses to one set member.
        let records = vec![RecipeRecord::new(
            "odd",
            vec![
                IngredientEntry::new("salt").with_group([0, 1]),
                IngredientEntry::new("salt").with_group([0, 1]),
            ],
        )];
        let set = GraphBuilder::new().build(&records).unwrap();
        assert_eq!(set.substitution.edge_count(), 0);
    }

    #[test]
    fn test_duplicate_relations_deduplicated_by_default() {
        let records = vec![
            RecipeRecord::new(
                "a",
                vec![
                    IngredientEntry::new("butter").with_group([0, 1]),
                    IngredientEntry::new("margarine").with_group([0, 1]),
                ],
            ),
            RecipeRecord::new(
                "b",
                vec![
                    IngredientEntry::new("butter").with_group([0, 1]),
                    IngredientEntry::new("margarine").with_group([0, 1]),
                ],
            ),
        ];
        let set = GraphBuilder::new().build(&records).unwrap();

        let a = set
            .substitution
            .index_of(NodeKind::Ingredient, "butter")
            .unwrap();
        let b = set
            .substitution
            .index_of(NodeKind::Ingredient, "margarine")
            .unwrap();
        assert_eq!(set.substitution.edge_between(a, b).unwrap().weight, 1.0);
    }

    #[test]
    fn test_accumulate_policy_adds_weight() {
        let records = vec![
            RecipeRecord::new(
                "a",
                vec![
                    IngredientEntry::new("butter").with_group([0, 1]),
                    IngredientEntry::new("margarine").with_group([0, 1]),
                ],
            ),
            RecipeRecord::new(
                "b",
                vec![
                    IngredientEntry::new("butter").with_group([0, 1]),
                    IngredientEntry::new("margarine").with_group([0, 1]),
                ],
            ),
        ];
        let set = GraphBuilder::new()
            .with_substitution_weighting(SubstitutionWeighting::Accumulate)
            .build(&records)
            .unwrap();

        let a = set
            .substitution
            .index_of(NodeKind::Ingredient, "butter")
            .unwrap();
        let b = set
            .substitution
            .index_of(NodeKind::Ingredient, "margarine")
            .unwrap();
        assert_eq!(set.substitution.edge_between(a, b).unwrap().weight, 2.0);
    }

    #[test]
    fn test_out_of_range_group_index_fails() {
        let records = vec![RecipeRecord::new(
            "broken",
            vec![
                IngredientEntry::new("salt").with_group([0, 7]),
                IngredientEntry::new("pepper"),
            ],
        )];
        let err = GraphBuilder::new().build(&records).unwrap_err();
        assert!(matches!(
            err,
            GraphError::SubstitutionIndexOutOfRange { index: 7, .. }
        ));
    }

    #[test]
    fn test_membership_edges_carry_recognized_attrs() {
        let records = vec![RecipeRecord::new(
            "bread",
            vec![IngredientEntry::new("flour")
                .with_attr("quantity", 500.0)
                .with_attr("unit", "g")
                .with_attr("aisle", "baking")],
        )];
        let set = GraphBuilder::new().build(&records).unwrap();

        let edge = set.membership.edges().next().unwrap();
        assert!(edge.attrs.contains_key("quantity"));
        assert!(edge.attrs.contains_key("unit"));
        // Unrecognized keys are filtered out.
        assert!(!edge.attrs.contains_key("aisle"));
    }
}
