//! Deterministic numeric simulators backing the transformer article
//! widgets.
//!
//! Each simulator is a pure, synchronous function from plain parameters to
//! plain derived data: attention weights, top-k classifications, routing
//! assignments, quantization error statistics. Rendering, typesetting, and
//! widget lifecycle live elsewhere; this crate returns numbers and
//! classifications only, so the same recompute can drive any visual
//! representation.
//!
//! # Determinism
//!
//! Nothing here touches ambient randomness. Wherever a demo needs random
//! data (indexer noise, sampled expert preferences, uniform gates) the
//! simulator takes an injected [`rand::Rng`], seeded by the caller — in
//! practice a `ChaCha8Rng` seeded per widget mount, so a viewing session
//! replays identically.
//!
//! # Example
//!
//! ```
//! use tfwidgets_sim::attention::{self, AttentionParams};
//!
//! let result = attention::simulate(&AttentionParams {
//!     query: vec![0.8, 0.2],
//!     keys: vec![vec![0.9, 0.1], vec![0.1, 0.9], vec![0.5, 0.5]],
//!     values: vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]],
//!     scale_by_sqrt_dim: false,
//! })?;
//! assert!((result.weights.iter().sum::<f32>() - 1.0).abs() < 1e-6);
//! # Ok::<(), tfwidgets_sim::SimError>(())
//! ```

pub mod attention;
pub mod error;
pub mod quantization;
pub mod routing;
pub mod sparse_index;
pub mod vecmath;

pub use error::{ConfigError, Result, SimError};
