//! Nearest-value lookup over a sorted brightness scale.

// Distances closer than this are a tie; values live in [0, 1]
const TIE_EPSILON: f64 = 1e-12;

/// Value of `sorted` nearest to `target`, or `None` when `sorted` is empty.
///
/// Looks only at the floor (largest value `<= target`) and ceiling (smallest
/// value `>= target`). On equal distance the ceiling wins.
pub fn closest(target: f64, sorted: &[f64]) -> Option<f64> {
    closest_index(target, sorted).map(|i| sorted[i])
}

/// Index form of [`closest`].
pub fn closest_index(target: f64, sorted: &[f64]) -> Option<usize> {
    // First index with value >= target
    let ceiling = sorted.partition_point(|&v| v < target);
    // First index with value > target, minus one
    let above = sorted.partition_point(|&v| v <= target);
    let floor = above.checked_sub(1);
    let ceiling = (ceiling < sorted.len()).then_some(ceiling);

    match (floor, ceiling) {
        (None, None) => None,
        (None, Some(c)) => Some(c),
        (Some(f), None) => Some(f),
        (Some(f), Some(c)) => {
            if sorted[c] - target <= target - sorted[f] + TIE_EPSILON {
                Some(c)
            } else {
                Some(f)
            }
        }
    }
}
