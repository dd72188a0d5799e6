//! Expert-capacity demo: a single deterministic pass assigning tokens to
//! their preferred expert until it fills up.
//!
//! Tokens are processed strictly in index order. A token whose preferred
//! expert is already at capacity is dropped on the spot; there is no
//! rerouting to a second choice (the article discusses rerouting as an
//! alternative, the widget shows the plain drop behavior).

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, Result, SimError};
use crate::routing::TokenAssignment;

/// Validated configuration for the capacity demo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityConfig {
    /// Number of experts, > 0.
    pub num_experts: usize,
    /// Number of tokens in the pool, > 0.
    pub num_tokens: usize,
    /// Multiplier on the perfectly balanced per-expert share, > 0.
    pub capacity_factor: f32,
}

impl CapacityConfig {
    /// Validate and build a config.
    ///
    /// # Errors
    /// `ConfigError` for zero counts or a non-positive/non-finite factor.
    pub fn new(num_experts: usize, num_tokens: usize, capacity_factor: f32) -> Result<Self> {
        if num_experts == 0 {
            return Err(ConfigError::ZeroExperts.into());
        }
        if num_tokens == 0 {
            return Err(ConfigError::ZeroTokens.into());
        }
        if !(capacity_factor > 0.0 && capacity_factor.is_finite()) {
            return Err(ConfigError::NonPositiveCapacityFactor {
                got: capacity_factor,
            }
            .into());
        }
        Ok(Self {
            num_experts,
            num_tokens,
            capacity_factor,
        })
    }

    /// `floor(num_tokens / num_experts * capacity_factor)`.
    ///
    /// May be 0 for a sufficiently low factor, in which case every token
    /// is dropped; that is defined behavior, not an error.
    pub fn capacity_per_expert(&self) -> usize {
        (self.num_tokens as f32 / self.num_experts as f32 * self.capacity_factor).floor() as usize
    }
}

/// Derived state for the capacity widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityResult {
    /// Per-token outcome in processing order.
    pub assignments: Vec<TokenAssignment>,
    /// Accepted-token count per expert; never exceeds the capacity bound.
    pub per_expert_load: Vec<usize>,
    /// Tokens no expert accepted.
    pub dropped_count: usize,
    /// The derived bound the pass ran under.
    pub capacity_per_expert: usize,
}

/// Route tokens to explicit preferred experts, dropping overflow.
///
/// The pass is deterministic: token `i` is processed before token `i + 1`,
/// so with a fixed preference list the same tokens overflow every time.
///
/// # Errors
/// - `SimError::DimensionMismatch` if `preferred` does not have exactly one
///   entry per token
/// - `ConfigError::ExpertIndexOutOfRange` for a preference outside the pool
pub fn route_with_preferences(
    config: &CapacityConfig,
    preferred: &[usize],
) -> Result<CapacityResult> {
    if preferred.len() != config.num_tokens {
        return Err(SimError::DimensionMismatch {
            expected: config.num_tokens,
            actual: preferred.len(),
        });
    }

    let capacity = config.capacity_per_expert();
    if capacity == 0 {
        warn!(
            capacity_factor = config.capacity_factor,
            "capacity bound is zero, every token will be dropped"
        );
    }
    debug!(
        num_experts = config.num_experts,
        num_tokens = config.num_tokens,
        capacity,
        "routing tokens under capacity bound"
    );

    let mut per_expert_load = vec![0usize; config.num_experts];
    let mut assignments = Vec::with_capacity(config.num_tokens);
    let mut dropped_count = 0;

    for (token, &expert) in preferred.iter().enumerate() {
        if expert >= config.num_experts {
            return Err(ConfigError::ExpertIndexOutOfRange {
                expert,
                num_experts: config.num_experts,
            }
            .into());
        }
        if per_expert_load[expert] < capacity {
            per_expert_load[expert] += 1;
            assignments.push(TokenAssignment::routed(token, vec![expert]));
        } else {
            dropped_count += 1;
            assignments.push(TokenAssignment::dropped(token));
        }
    }

    Ok(CapacityResult {
        assignments,
        per_expert_load,
        dropped_count,
        capacity_per_expert: capacity,
    })
}

/// Sample one preferred expert per token from a weight distribution.
///
/// Uniform weights model a balanced load; skewed weights (the widget's
/// "hot expert" toggle) concentrate tokens on a few experts to provoke
/// drops.
///
/// # Errors
/// - `SimError::DimensionMismatch` if the weight count differs from the
///   expert count
/// - `ConfigError::InvalidWeights` if the weights cannot form a
///   distribution (all zero, negative entries)
pub fn sample_preferences<R: Rng>(
    config: &CapacityConfig,
    expert_weights: &[f32],
    rng: &mut R,
) -> Result<Vec<usize>> {
    if expert_weights.len() != config.num_experts {
        return Err(SimError::DimensionMismatch {
            expected: config.num_experts,
            actual: expert_weights.len(),
        });
    }
    let dist = WeightedIndex::new(expert_weights).map_err(|e| ConfigError::InvalidWeights {
        reason: e.to_string(),
    })?;
    Ok((0..config.num_tokens).map(|_| dist.sample(rng)).collect())
}

/// Sample preferences and route in one call.
pub fn route_sampled<R: Rng>(
    config: &CapacityConfig,
    expert_weights: &[f32],
    rng: &mut R,
) -> Result<CapacityResult> {
    let preferred = sample_preferences(config, expert_weights, rng)?;
    route_with_preferences(config, &preferred)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_config_rejects_bad_values() {
        assert!(CapacityConfig::new(0, 24, 1.0).is_err());
        assert!(CapacityConfig::new(4, 0, 1.0).is_err());
        assert!(CapacityConfig::new(4, 24, 0.0).is_err());
        assert!(CapacityConfig::new(4, 24, -1.0).is_err());
        assert!(CapacityConfig::new(4, 24, f32::NAN).is_err());
    }

    #[test]
    fn test_capacity_derivation() {
        let config = CapacityConfig::new(4, 24, 1.0).unwrap();
        assert_eq!(config.capacity_per_expert(), 6);

        let config = CapacityConfig::new(4, 24, 1.25).unwrap();
        assert_eq!(config.capacity_per_expert(), 7);

        let config = CapacityConfig::new(8, 4, 0.5).unwrap();
        assert_eq!(config.capacity_per_expert(), 0);
    }

    #[test]
    fn test_hot_expert_overflow_scenario() {
        // 24 tokens, 4 experts, factor 1.0 => capacity 6. Ten tokens
        // prefer expert 0: the first six are accepted, four overflow.
        let config = CapacityConfig::new(4, 24, 1.0).unwrap();
        let mut preferred = vec![0usize; 10];
        for i in 0..14 {
            preferred.push(1 + i % 3);
        }
        let result = route_with_preferences(&config, &preferred).unwrap();

        assert_eq!(result.capacity_per_expert, 6);
        assert_eq!(result.per_expert_load[0], 6);
        assert_eq!(result.dropped_count, 4);
        // The overflow hits the latest-processed tokens preferring expert 0.
        for token in 0..6 {
            assert!(!result.assignments[token].dropped);
        }
        for token in 6..10 {
            assert!(result.assignments[token].dropped);
        }
    }

    #[test]
    fn test_conservation_invariant() {
        let config = CapacityConfig::new(3, 17, 0.7).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let result = route_sampled(&config, &[1.0, 1.0, 1.0], &mut rng).unwrap();

        let total: usize = result.per_expert_load.iter().sum();
        assert_eq!(total + result.dropped_count, 17);
        let capacity = config.capacity_per_expert();
        assert!(result.per_expert_load.iter().all(|&l| l <= capacity));
    }

    #[test]
    fn test_zero_capacity_drops_everything() {
        let config = CapacityConfig::new(8, 4, 0.5).unwrap();
        let result = route_with_preferences(&config, &[0, 1, 2, 3]).unwrap();
        assert_eq!(result.dropped_count, 4);
        assert!(result.assignments.iter().all(|a| a.dropped));
    }

    #[test]
    fn test_ample_capacity_drops_nothing() {
        let config = CapacityConfig::new(4, 12, 4.0).unwrap();
        assert!(config.capacity_per_expert() >= 12);
        let result = route_with_preferences(&config, &[0; 12]).unwrap();
        assert_eq!(result.dropped_count, 0);
    }

    #[test]
    fn test_monotone_in_capacity_factor() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let base = CapacityConfig::new(4, 24, 1.0).unwrap();
        let preferred = sample_preferences(&base, &[5.0, 1.0, 1.0, 1.0], &mut rng).unwrap();

        let mut previous = usize::MAX;
        for factor in [0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 4.0] {
            let config = CapacityConfig::new(4, 24, factor).unwrap();
            let result = route_with_preferences(&config, &preferred).unwrap();
            assert!(result.dropped_count <= previous);
            previous = result.dropped_count;
        }
    }

    #[test]
    fn test_rejects_out_of_range_preference() {
        let config = CapacityConfig::new(2, 3, 1.0).unwrap();
        let err = route_with_preferences(&config, &[0, 2, 1]).unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidConfig(ConfigError::ExpertIndexOutOfRange { expert: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_all_zero_weights() {
        let config = CapacityConfig::new(2, 3, 1.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = sample_preferences(&config, &[0.0, 0.0], &mut rng).unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidConfig(ConfigError::InvalidWeights { .. })
        ));
    }

    #[test]
    fn test_same_seed_same_routing() {
        let config = CapacityConfig::new(4, 24, 1.0).unwrap();
        let weights = [3.0, 1.0, 1.0, 1.0];
        let a = route_sampled(&config, &weights, &mut ChaCha8Rng::seed_from_u64(2)).unwrap();
        let b = route_sampled(&config, &weights, &mut ChaCha8Rng::seed_from_u64(2)).unwrap();
        assert_eq!(a, b);
    }
}
