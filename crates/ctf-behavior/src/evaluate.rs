//! Linear scoring and deterministic selection.

use crate::{FeatureVector, WeightTable};

/// Weighted sum of the populated features.
#[inline]
pub fn evaluate(features: &FeatureVector, weights: &WeightTable) -> f64 {
    weights.dot(features)
}

/// First item with the maximal score, in enumeration order.
///
/// `None` only for an empty slice.
pub fn select_best<T: Copy>(scored: &[(T, f64)]) -> Option<T> {
    let mut best: Option<(T, f64)> = None;
    for &(item, score) in scored {
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((item, score));
        }
    }
    best.map(|(item, _)| item)
}

/// First item with the minimal distance, in enumeration order.
pub fn select_nearest<T: Copy>(distances: &[(T, u32)]) -> Option<T> {
    let mut best: Option<(T, u32)> = None;
    for &(item, d) in distances {
        if best.is_none_or(|(_, closest)| d < closest) {
            best = Some((item, d));
        }
    }
    best.map(|(item, _)| item)
}
