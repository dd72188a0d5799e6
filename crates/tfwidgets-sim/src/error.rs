//! Error types for the simulator family.
//!
//! The taxonomy is deliberately small and purely input-validation driven:
//! dimension disagreements and out-of-range configs fail fast; numeric edge
//! cases (all-zero scores, zero capacity) are defined degenerate behaviors,
//! not errors. The UI layer clamps its controls, so these errors only fire
//! when a caller wires parameters together incorrectly.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;

// ============================================================================
// CONFIG ERROR
// ============================================================================

/// Invalid simulator configuration.
///
/// The core rejects out-of-range configs rather than silently clamping;
/// range enforcement belongs to the input controls.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Expert count must be positive.
    #[error("num_experts must be > 0")]
    ZeroExperts,

    /// Token count must be positive.
    #[error("num_tokens must be > 0")]
    ZeroTokens,

    /// Capacity factor must be a positive finite real.
    #[error("capacity_factor must be > 0 and finite, got {got}")]
    NonPositiveCapacityFactor {
        /// The rejected value
        got: f32,
    },

    /// Bit width outside the supported quantization range.
    #[error("bit_width must be in [{min}, {max}], got {got}")]
    BitWidthOutOfRange {
        /// The rejected value
        got: u32,
        /// Lower bound (inclusive)
        min: u32,
        /// Upper bound (inclusive)
        max: u32,
    },

    /// Routing width must select at least one expert.
    #[error("top_k must be > 0")]
    ZeroRoutingWidth,

    /// Routing width cannot exceed the expert pool.
    #[error("top_k {top_k} exceeds num_experts {num_experts}")]
    RoutingWidthExceedsExperts {
        /// Requested routing width
        top_k: usize,
        /// Available experts
        num_experts: usize,
    },

    /// A token's preferred expert index is out of range.
    #[error("expert index {expert} out of range for {num_experts} experts")]
    ExpertIndexOutOfRange {
        /// The offending expert index
        expert: usize,
        /// Available experts
        num_experts: usize,
    },

    /// Expert preference weights could not form a distribution.
    #[error("invalid expert weights: {reason}")]
    InvalidWeights {
        /// Why the weights were rejected
        reason: String,
    },
}

// ============================================================================
// UNIFIED SIMULATOR ERROR
// ============================================================================

/// Top-level error for all simulators.
///
/// Every failure is deterministic and immediate; there are no retries
/// anywhere in this crate. A simulator error is expected to be isolated to
/// its own widget's display by the shell layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// Vector length disagreement in a dot product or accumulation.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected length (from the first operand)
        expected: usize,
        /// Actual length received
        actual: usize,
    },

    /// Attention was given a different number of keys and values.
    #[error("key/value count mismatch: {keys} keys vs {values} values")]
    KeyValueCountMismatch {
        /// Number of key vectors
        keys: usize,
        /// Number of value vectors
        values: usize,
    },

    /// A simulator config failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),
}
