use thiserror::Error;

/// Errors produced while loading or validating recipe records.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A substitution group references a position outside the owning
    /// recipe's ingredient list.
    #[error("recipe `{recipe}`: substitution index {index} out of range (recipe has {len} ingredients)")]
    SubstitutionIndexOutOfRange {
        recipe: String,
        index: usize,
        len: usize,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CoreError>;
