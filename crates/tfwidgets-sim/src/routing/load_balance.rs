//! Load-balance demo: which experts light up for each token.
//!
//! The default widget is unscored: each token picks `top_k` distinct
//! experts uniformly at random, modeling the visual of activations
//! spreading across the pool. The scored variant runs a softmax gate and
//! keeps the `top_k` strongest experts, sharing its tie-break with the
//! sparse indexer.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result, SimError};
use crate::routing::TokenAssignment;
use crate::vecmath::{softmax, top_k_indices};

/// Validated configuration for the load-balance demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalanceConfig {
    /// Number of experts, > 0.
    pub num_experts: usize,
    /// Routing width: experts activated per token, in `[1, num_experts]`.
    pub top_k: usize,
}

impl LoadBalanceConfig {
    /// Validate and build a config.
    ///
    /// # Errors
    /// `ConfigError` when the expert pool is empty or the routing width is
    /// zero or wider than the pool.
    pub fn new(num_experts: usize, top_k: usize) -> Result<Self> {
        if num_experts == 0 {
            return Err(ConfigError::ZeroExperts.into());
        }
        if top_k == 0 {
            return Err(ConfigError::ZeroRoutingWidth.into());
        }
        if top_k > num_experts {
            return Err(ConfigError::RoutingWidthExceedsExperts {
                top_k,
                num_experts,
            }
            .into());
        }
        Ok(Self {
            num_experts,
            top_k,
        })
    }
}

/// Route every token to `top_k` distinct experts chosen uniformly at
/// random without replacement.
///
/// Selections are sorted ascending for display stability; every token gets
/// exactly `top_k` experts, never zero, never duplicates.
pub fn route_uniform<R: Rng>(
    config: &LoadBalanceConfig,
    token_count: usize,
    rng: &mut R,
) -> Vec<TokenAssignment> {
    debug!(
        num_experts = config.num_experts,
        top_k = config.top_k,
        token_count,
        "routing tokens through uniform gate"
    );
    (0..token_count)
        .map(|token| {
            let mut experts =
                rand::seq::index::sample(rng, config.num_experts, config.top_k).into_vec();
            experts.sort_unstable();
            TokenAssignment::routed(token, experts)
        })
        .collect()
}

/// Route every token through a softmax gate, keeping the `top_k` strongest
/// experts.
///
/// `gate_scores` holds one score row per token, one score per expert.
/// Ranking uses the same descending-score, stable-ascending-index tie-break
/// as the sparse indexer; the chosen experts are then sorted ascending for
/// display.
///
/// # Errors
/// `SimError::DimensionMismatch` if any gate row does not have exactly one
/// score per expert.
pub fn route_scored(
    config: &LoadBalanceConfig,
    gate_scores: &[Vec<f32>],
) -> Result<Vec<TokenAssignment>> {
    let mut assignments = Vec::with_capacity(gate_scores.len());
    for (token, row) in gate_scores.iter().enumerate() {
        if row.len() != config.num_experts {
            return Err(SimError::DimensionMismatch {
                expected: config.num_experts,
                actual: row.len(),
            });
        }
        let gate = softmax(row);
        let mut experts = top_k_indices(&gate, config.top_k);
        experts.sort_unstable();
        assignments.push(TokenAssignment::routed(token, experts));
    }
    Ok(assignments)
}
