//! Pairwise association scoring.
//!
//! Pointwise Mutual Information over recipe co-occurrence:
//!
//! ```text
//! PMI(x, y) = log2( P(x, y) / P(x) P(y) )
//!           = log2( (Lxy * n) / (Lx * Ly) )
//! ```
//!
//! where `Lxy` is the number of recipes containing both ingredients,
//! `Lx`/`Ly` the number containing each, and `n` the total recipe count.

use crate::error::{GraphError, Result};
use std::collections::{HashMap, HashSet};

/// Number of decimal digits scores are rounded to.
const SCORE_DECIMAL_DIGITS: i32 = 6;

/// Maps an ingredient name to the set of recipe names it appears in.
pub type OccurrenceSets = HashMap<String, HashSet<String>>;

/// Scores the association between two distinct ingredients.
///
/// Returns `None` when the ingredients never co-occur: that is a designed
/// "no edge" sentinel, not an error. Zero and negative scores are valid
/// and still produce an edge. Naming an ingredient absent from
/// `occurrences` is a caller contract violation and fails.
pub fn pointwise_mutual_information(
    x: &str,
    y: &str,
    occurrences: &OccurrenceSets,
    n_docs: usize,
) -> Result<Option<f64>> {
    let in_x = occurrences
        .get(x)
        .ok_or_else(|| GraphError::UnknownIngredient(x.to_string()))?;
    let in_y = occurrences
        .get(y)
        .ok_or_else(|| GraphError::UnknownIngredient(y.to_string()))?;

    let lxy = in_x.intersection(in_y).count();
    let lx = in_x.len();
    let ly = in_y.len();

    if lxy == 0 || lx == 0 || ly == 0 {
        return Ok(None);
    }

    let ratio = (lxy * n_docs) as f64 / (lx * ly) as f64;
    Ok(Some(round_to(ratio.log2(), SCORE_DECIMAL_DIGITS)))
}

fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}
