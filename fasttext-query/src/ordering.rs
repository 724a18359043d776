//! Ranking of scored results
//!
//! Scores sort descending. NaN is treated as lower than every real value,
//! including negative infinity, and all NaNs compare equal to each other.
//! Sorting is stable, so equal scores (and NaNs) keep their engine order.

use std::cmp::Ordering;

use crate::types::{Analog, Neighbor, Prediction};

/// A result record that carries a ranking score
pub trait Scored {
    fn score(&self) -> f32;
}

impl Scored for Neighbor {
    fn score(&self) -> f32 {
        self.probability
    }
}

impl Scored for Analog {
    fn score(&self) -> f32 {
        self.probability
    }
}

impl Scored for Prediction {
    fn score(&self) -> f32 {
        self.probability
    }
}

/// Three-way comparison for descending rank order.
///
/// `Less` means `a` ranks before `b`.
pub fn compare_scores(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            if a > b {
                Ordering::Less
            } else if a < b {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
    }
}

/// Stable in-place sort, highest score first, NaN last
pub fn sort_by_score<T: Scored>(items: &mut [T]) {
    items.sort_by(|a, b| compare_scores(a.score(), b.score()));
}

/// Sorted copy of `items`
pub fn sorted_by_score<T: Scored + Clone>(items: &[T]) -> Vec<T> {
    let mut sorted = items.to_vec();
    sort_by_score(&mut sorted);
    sorted
}

/// Order neighbors by probability, highest first
pub fn sort_neighbors(neighbors: &mut [Neighbor]) {
    sort_by_score(neighbors);
}
