use thiserror::Error;

/// Errors surfaced by graph construction and queries.
///
/// All of these are contract violations or lookups against names the
/// model has never seen; nothing here is retried or swallowed.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A scoring input named an ingredient with no occurrence set.
    #[error("ingredient `{0}` missing from occurrence sets")]
    UnknownIngredient(String),

    /// A substitution group referenced a position outside its recipe's
    /// ingredient list.
    #[error("recipe `{recipe}`: substitution index {index} out of range (recipe has {len} entries)")]
    SubstitutionIndexOutOfRange {
        recipe: String,
        index: usize,
        len: usize,
    },

    /// A query named an ingredient that appears in no loaded graph.
    /// Distinct from an ingredient that is known but has no neighbors.
    #[error("ingredient `{0}` does not appear in the model")]
    IngredientNotFound(String),
}

/// Convenience alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
