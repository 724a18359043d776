//! Vector arithmetic over embedding coordinates
//!
//! Inputs are `f32` slices as returned by [`Vectors::values`]; sums are
//! accumulated in `f64` so long embeddings do not drift.
//!
//! [`Vectors::values`]: crate::types::Vectors::values

use crate::error::{FastTextError, Result};

/// Sum of `a[i] * b[i]` over aligned coordinates.
///
/// Fails with [`FastTextError::DimensionMismatch`] when the lengths differ.
pub fn dot_product(a: &[f32], b: &[f32]) -> Result<f32> {
    check_dimensions(a, b)?;
    Ok(dot_unchecked(a, b) as f32)
}

/// Euclidean (L2) norm. The empty and the zero vector both have norm 0.
pub fn norm(v: &[f32]) -> f32 {
    norm_f64(v) as f32
}

/// Cosine similarity between two embeddings.
///
/// A zero-norm operand is rejected with [`FastTextError::DegenerateInput`]
/// rather than mapped to a sentinel. NaN coordinates yield a NaN result.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    check_dimensions(a, b)?;

    let norm_a = norm_f64(a);
    let norm_b = norm_f64(b);
    if norm_a == 0.0 {
        return Err(FastTextError::degenerate("left operand has zero norm"));
    }
    if norm_b == 0.0 {
        return Err(FastTextError::degenerate("right operand has zero norm"));
    }

    Ok((dot_unchecked(a, b) / (norm_a * norm_b)) as f32)
}

fn check_dimensions(a: &[f32], b: &[f32]) -> Result<()> {
    if a.len() != b.len() {
        return Err(FastTextError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}

fn dot_unchecked(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum()
}

fn norm_f64(v: &[f32]) -> f64 {
    v.iter()
        .map(|x| f64::from(*x) * f64::from(*x))
        .sum::<f64>()
        .sqrt()
}
