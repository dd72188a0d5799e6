//! Scaled dot-product attention demo.
//!
//! Recomputes the worked example from the attention article: one query
//! against a handful of key/value pairs, `scores -> softmax -> weighted
//! sum of values`. The teaching demo deliberately skips the `1/sqrt(d)`
//! scaling so the prose formula and the numbers on screen match digit for
//! digit; the flag exists for the variant that discusses scaling.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SimError};
use crate::vecmath::{dot, softmax, weighted_sum};

/// Inputs for one attention recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionParams {
    /// The single query vector.
    pub query: Vec<f32>,
    /// Key vectors, one per attended position.
    pub keys: Vec<Vec<f32>>,
    /// Value vectors, same count as keys.
    pub values: Vec<Vec<f32>>,
    /// Divide scores by `sqrt(dim)` before the softmax.
    /// Off by default to match the simplified teaching example.
    #[serde(default)]
    pub scale_by_sqrt_dim: bool,
}

/// Derived state for the attention widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionResult {
    /// Raw (optionally scaled) query-key scores, one per key.
    pub scores: Vec<f32>,
    /// Softmax of the scores; non-negative, sums to 1.
    pub weights: Vec<f32>,
    /// Weighted sum of the value vectors.
    pub output: Vec<f32>,
}

/// Run one attention recompute.
///
/// Pure: identical params yield identical results. All-zero (or otherwise
/// all-equal) scores are not an error and produce uniform weights.
///
/// # Errors
/// - `SimError::KeyValueCountMismatch` if `keys` and `values` differ in count
/// - `SimError::DimensionMismatch` if any key or value disagrees with the
///   query dimension
pub fn simulate(params: &AttentionParams) -> Result<AttentionResult> {
    if params.keys.len() != params.values.len() {
        return Err(SimError::KeyValueCountMismatch {
            keys: params.keys.len(),
            values: params.values.len(),
        });
    }
    // Keys are checked against the query by `dot`; values share the same
    // dimensionality contract, so the output has the query's dimension.
    for value in &params.values {
        if value.len() != params.query.len() {
            return Err(SimError::DimensionMismatch {
                expected: params.query.len(),
                actual: value.len(),
            });
        }
    }

    debug!(
        dim = params.query.len(),
        positions = params.keys.len(),
        scaled = params.scale_by_sqrt_dim,
        "recomputing attention demo"
    );

    let scale = if params.scale_by_sqrt_dim {
        1.0 / (params.query.len() as f32).sqrt()
    } else {
        1.0
    };

    let mut scores = Vec::with_capacity(params.keys.len());
    for key in &params.keys {
        scores.push(dot(&params.query, key)? * scale);
    }

    let weights = softmax(&scores);
    let output = weighted_sum(&weights, &params.values)?;

    Ok(AttentionResult {
        scores,
        weights,
        output,
    })
}
