//! Quantization error demo: levels, step size, and rounding error across
//! a synthetic value sweep.
//!
//! The widget sweeps a bit-width slider and a symmetric/asymmetric toggle
//! and redraws the error bars from the report returned here. The maximum
//! error is the closed-form bound `step / 2`, not the measured maximum, so
//! the displayed bound does not wiggle when the sweep happens to miss a
//! worst-case offset.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::vecmath::{linspace, round_to_step};

/// Validated configuration for the quantization demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantizationConfig {
    /// Bit width, in `[MIN_BIT_WIDTH, MAX_BIT_WIDTH]`.
    pub bit_width: u32,
    /// Symmetric mode quantizes `[-1, 1]`; asymmetric quantizes `[0, 1]`.
    pub symmetric: bool,
}

impl QuantizationConfig {
    /// Lowest bit width the demo slider offers.
    pub const MIN_BIT_WIDTH: u32 = 2;
    /// Highest bit width the demo slider offers.
    pub const MAX_BIT_WIDTH: u32 = 8;

    /// Validate and build a config.
    ///
    /// # Errors
    /// `ConfigError::BitWidthOutOfRange` outside `[2, 8]`.
    pub fn new(bit_width: u32, symmetric: bool) -> Result<Self> {
        if !(Self::MIN_BIT_WIDTH..=Self::MAX_BIT_WIDTH).contains(&bit_width) {
            return Err(ConfigError::BitWidthOutOfRange {
                got: bit_width,
                min: Self::MIN_BIT_WIDTH,
                max: Self::MAX_BIT_WIDTH,
            }
            .into());
        }
        Ok(Self {
            bit_width,
            symmetric,
        })
    }

    /// `2^bit_width` representable levels.
    pub fn num_levels(&self) -> u32 {
        1 << self.bit_width
    }

    /// The representable range `(lo, hi)` for this mode.
    pub fn range(&self) -> (f32, f32) {
        if self.symmetric {
            (-1.0, 1.0)
        } else {
            (0.0, 1.0)
        }
    }

    /// Spacing between adjacent representable values.
    pub fn step(&self) -> f32 {
        let (lo, hi) = self.range();
        (hi - lo) / (self.num_levels() - 1) as f32
    }
}

/// Derived state for the quantization widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantizationReport {
    /// Representable levels at this bit width.
    pub num_levels: u32,
    /// Spacing between adjacent levels.
    pub step: f32,
    /// Absolute rounding error per sweep sample.
    pub per_sample_error: Vec<f32>,
    /// Mean of the per-sample errors (0 for an empty sweep).
    pub avg_error: f32,
    /// Closed-form worst-case bound `step / 2`, independent of the sweep.
    pub max_error: f32,
}

/// The default sweep: `n` evenly spaced samples spanning the config's
/// representable range.
pub fn sweep(config: &QuantizationConfig, n: usize) -> Vec<f32> {
    let (lo, hi) = config.range();
    linspace(lo, hi, n)
}

/// Quantize every sample and report the error statistics.
///
/// Each sample is rounded to the nearest step multiple and clamped to the
/// representable range; the error is the absolute distance from the
/// original value. Pure: identical inputs give identical reports.
pub fn simulate(config: &QuantizationConfig, samples: &[f32]) -> QuantizationReport {
    let num_levels = config.num_levels();
    let step = config.step();
    let (lo, hi) = config.range();

    debug!(
        bit_width = config.bit_width,
        symmetric = config.symmetric,
        num_levels,
        step,
        "recomputing quantization error sweep"
    );

    let per_sample_error: Vec<f32> = samples
        .iter()
        .map(|&x| {
            let quantized = round_to_step(x, step).clamp(lo, hi);
            (x - quantized).abs()
        })
        .collect();

    let avg_error = if per_sample_error.is_empty() {
        0.0
    } else {
        per_sample_error.iter().sum::<f32>() / per_sample_error.len() as f32
    };

    QuantizationReport {
        num_levels,
        step,
        per_sample_error,
        avg_error,
        max_error: step / 2.0,
    }
}
