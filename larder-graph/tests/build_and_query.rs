//! End-to-end: build the graph triple, persist it, reload it, query it.

use larder_core::{IngredientEntry, RecipeRecord};
use larder_graph::{GraphBuilder, GraphKind, GraphStore, NodeKind};
use std::collections::HashSet;

fn pantry_records() -> Vec<RecipeRecord> {
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
fn full_pipeline_survives_a_store_round_trip() {
    let graphs = GraphBuilder::new().build(&pantry_records()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let store = GraphStore::open(dir.path()).unwrap();
    store.save_set(&graphs).unwrap();
    let reloaded = store.load_set().unwrap();

    assert_eq!(reloaded.stats(), graphs.stats());

    // Queries behave identically on the reloaded set.
    assert_eq!(reloaded.substitutes_for("pepper").unwrap(), vec!["salt"]);

    let query: HashSet<String> = ["salt".to_string()].into_iter().collect();
    let matches = reloaded.recipes_containing(&query);
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].recipe, "soup");
    assert_eq!(matches[1].recipe, "stew");
    assert!(matches.iter().all(|m| m.matches == 1));
}

#[test]
fn correlation_weights_survive_persistence_exactly() {
    // egg in 3 recipes, milk in 2, co-occurring once, 4 recipes total:
    // PMI = log2((1 * 4) / (3 * 2)) = -0.584963 after rounding.
    let records = vec![
        RecipeRecord::new(
            "omelette",
            vec![IngredientEntry::new("egg"), IngredientEntry::new("milk")],
        ),
        RecipeRecord::new("custard", vec![IngredientEntry::new("egg")]),
        RecipeRecord::new(
            "meringue",
            vec![IngredientEntry::new("egg"), IngredientEntry::new("sugar")],
        ),
        RecipeRecord::new("porridge", vec![IngredientEntry::new("milk")]),
    ];

    let graphs = GraphBuilder::new().build(&records).unwrap();
    let a = graphs
        .correlation
        .index_of(NodeKind::Ingredient, "egg")
        .unwrap();
    let b = graphs
        .correlation
        .index_of(NodeKind::Ingredient, "milk")
        .unwrap();
    let weight = graphs.correlation.edge_between(a, b).unwrap().weight;
    assert_eq!(weight, -0.584963);

    let dir = tempfile::tempdir().unwrap();
    let store = GraphStore::open(dir.path()).unwrap();
    store.save(GraphKind::Correlation, &graphs.correlation).unwrap();
    let reloaded = store.load(GraphKind::Correlation).unwrap();

    let a = reloaded.index_of(NodeKind::Ingredient, "egg").unwrap();
    let b = reloaded.index_of(NodeKind::Ingredient, "milk").unwrap();
    assert_eq!(reloaded.edge_between(a, b).unwrap().weight, weight);
}

#[test]
fn membership_edge_count_matches_entry_count() {
    let records = vec![
        RecipeRecord::new(
            "bread",
            vec![
                IngredientEntry::new("flour"),
                IngredientEntry::new("water"),
                IngredientEntry::new("salt"),
            ],
        ),
        RecipeRecord::new(
            "focaccia",
            vec![
                IngredientEntry::new("flour"),
                IngredientEntry::new("water"),
                IngredientEntry::new("salt"),
                IngredientEntry::new("rosemary"),
            ],
        ),
    ];
    let graphs = GraphBuilder::new().build(&records).unwrap();
    assert_eq!(graphs.membership.edge_count(), 7);
}
