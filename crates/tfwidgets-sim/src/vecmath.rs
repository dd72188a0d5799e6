//! Shared vector primitives: dot product, softmax, rounding, top-k.
//!
//! Every other simulator builds on these. All inputs in this domain are
//! tiny (2-12 elements), so the implementations favor clarity over SIMD.

use std::cmp::Ordering;

use crate::error::{Result, SimError};

/// Exponent clamp for softmax. Scores in the demos live in roughly
/// [-5, 5]; anything beyond this bound is pathological input and is
/// clamped rather than allowed to overflow `exp`.
const SOFTMAX_EXP_CLAMP: f32 = 60.0;

/// Internal dot product without validation.
/// Caller must ensure vectors have equal length.
#[inline]
fn dot_unchecked(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Calculate the dot product of two vectors.
///
/// # Errors
/// - `SimError::DimensionMismatch` if the vectors have different lengths
///
/// # Example
/// ```rust,ignore
/// let score = dot(&[0.8, 0.2], &[0.9, 0.1])?; // 0.74
/// ```
#[inline]
pub fn dot(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(SimError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(dot_unchecked(a, b))
}

/// Convert raw scores into non-negative weights summing to 1.
///
/// Subtracts the maximum score before exponentiating so the largest
/// exponent is 0, and clamps the shifted scores so pathological input
/// cannot overflow `exp`. All-equal scores (including all-zero) yield
/// uniform weights; no weight is ever NaN for finite input.
///
/// An empty score slice returns an empty weight vector.
pub fn softmax(scores: &[f32]) -> Vec<f32> {
    if scores.is_empty() {
        return Vec::new();
    }

    let max = scores.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores
        .iter()
        .map(|&s| (s - max).clamp(-SOFTMAX_EXP_CLAMP, 0.0).exp())
        .collect();
    let sum: f32 = exps.iter().sum();

    exps.iter().map(|&e| e / sum).collect()
}

/// Round `x` to the nearest multiple of `step`.
///
/// Uses `f32::round` (ties away from zero), one consistent policy for the
/// whole build. A non-positive `step` returns `x` unchanged.
#[inline]
pub fn round_to_step(x: f32, step: f32) -> f32 {
    if step <= 0.0 {
        return x;
    }
    (x / step).round() * step
}

/// Accumulate `sum_i weights[i] * vectors[i]` element-wise.
///
/// # Errors
/// - `SimError::DimensionMismatch` if the weight and vector counts differ,
///   or if the vectors disagree on dimensionality
pub fn weighted_sum(weights: &[f32], vectors: &[Vec<f32>]) -> Result<Vec<f32>> {
    if weights.len() != vectors.len() {
        return Err(SimError::DimensionMismatch {
            expected: weights.len(),
            actual: vectors.len(),
        });
    }
    let dim = vectors.first().map(Vec::len).unwrap_or(0);
    let mut acc = vec![0.0f32; dim];
    for (w, v) in weights.iter().zip(vectors.iter()) {
        if v.len() != dim {
            return Err(SimError::DimensionMismatch {
                expected: dim,
                actual: v.len(),
            });
        }
        for (a, x) in acc.iter_mut().zip(v.iter()) {
            *a += w * x;
        }
    }
    Ok(acc)
}

/// Minimum and maximum of a slice. Returns `None` for an empty slice.
pub fn min_max(values: &[f32]) -> Option<(f32, f32)> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().fold(
        (f32::INFINITY, f32::NEG_INFINITY),
        |(min, max), &v| (min.min(v), max.max(v)),
    ))
}

/// `n` evenly spaced samples spanning `[start, end]` inclusive.
///
/// `n == 0` returns an empty vector; `n == 1` returns just `start`.
pub fn linspace(start: f32, end: f32, n: usize) -> Vec<f32> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let span = end - start;
            (0..n)
                .map(|i| start + span * (i as f32 / (n - 1) as f32))
                .collect()
        }
    }
}

/// Indices of the `k` highest scores, descending by score with ties broken
/// stable by ascending index.
///
/// The tie-break is explicit rather than relying on sort stability: equal
/// scores keep their first-occurrence order so the UI is reproducible.
/// Returns all indices when `k >= scores.len()`.
pub fn top_k_indices(scores: &[f32], k: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.cmp(&b))
    });
    indices.truncate(k);
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_dot_matches_hand_computation() {
        let d = dot(&[0.8, 0.2], &[0.9, 0.1]).unwrap();
        assert!((d - 0.74).abs() < EPS);
    }

    #[test]
    fn test_dot_rejects_mismatched_lengths() {
        let err = dot(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert_eq!(
            err,
            SimError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_softmax_sums_to_one_and_stays_in_unit_interval() {
        let w = softmax(&[0.74, 0.26, 0.5]);
        let sum: f32 = w.iter().sum();
        assert!((sum - 1.0).abs() < EPS);
        assert!(w.iter().all(|&x| (0.0..=1.0).contains(&x)));
    }

    #[test]
    fn test_softmax_uniform_on_all_equal_scores() {
        for scores in [vec![0.0; 4], vec![3.5; 4], vec![-2.0; 4]] {
            let w = softmax(&scores);
            for &x in &w {
                assert!((x - 0.25).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_softmax_no_nan_on_extreme_scores() {
        let w = softmax(&[1e30, -1e30, 0.0]);
        assert!(w.iter().all(|x| x.is_finite()));
        let sum: f32 = w.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_softmax_empty_is_empty() {
        assert!(softmax(&[]).is_empty());
    }

    #[test]
    fn test_round_to_step_nearest_multiple() {
        assert!((round_to_step(0.37, 0.25) - 0.25).abs() < EPS);
        assert!((round_to_step(0.40, 0.25) - 0.5).abs() < EPS);
        assert!((round_to_step(-0.37, 0.25) - (-0.25)).abs() < EPS);
    }

    #[test]
    fn test_round_to_step_ignores_degenerate_step() {
        assert!((round_to_step(0.37, 0.0) - 0.37).abs() < EPS);
    }

    #[test]
    fn test_weighted_sum_convex_combination() {
        let out = weighted_sum(&[0.5, 0.5], &[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        assert!((out[0] - 0.5).abs() < EPS);
        assert!((out[1] - 0.5).abs() < EPS);
    }

    #[test]
    fn test_weighted_sum_rejects_ragged_vectors() {
        let err = weighted_sum(&[0.5, 0.5], &[vec![1.0, 0.0], vec![0.0]]).unwrap_err();
        assert!(matches!(err, SimError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_linspace_hits_both_endpoints() {
        let s = linspace(-1.0, 1.0, 5);
        assert_eq!(s.len(), 5);
        assert!((s[0] + 1.0).abs() < EPS);
        assert!((s[2]).abs() < EPS);
        assert!((s[4] - 1.0).abs() < EPS);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min_max(&[]), None);
        let (lo, hi) = min_max(&[0.2, -1.5, 3.0]).unwrap();
        assert!((lo + 1.5).abs() < EPS);
        assert!((hi - 3.0).abs() < EPS);
    }

    #[test]
    fn test_top_k_descending_with_stable_ties() {
        // Indices 1 and 3 tie; ascending index order must win.
        let scores = [0.1, 0.9, 0.5, 0.9, 0.2];
        assert_eq!(top_k_indices(&scores, 3), vec![1, 3, 2]);
    }

    #[test]
    fn test_top_k_larger_than_input_returns_all() {
        assert_eq!(top_k_indices(&[0.3, 0.7], 10), vec![1, 0]);
    }
}
