//! Utility functions for classifier outputs

/// Index and value of the largest value.
///
/// Only values greater than negative infinity are considered, so NaN entries
/// are skipped. Ties resolve to the first index. Returns `None` when nothing
/// qualifies.
pub fn index_of_max_value(values: &[f64]) -> Option<(usize, f64)> {
    values
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, value)| *value > f64::NEG_INFINITY)
        .fold(None, |best, (i, value)| match best {
            Some((_, max)) if max >= value => best,
            _ => Some((i, value)),
        })
}
