/// Percentile helpers for already-sorted slices.
///
/// - Empty input => `0.0`.
/// - `percentile <= 0` => first element.
/// - `percentile >= 1` => last element.
/// - Otherwise the position `(len - 1) * percentile` is linearly interpolated
///   between its floor and ceil neighbours.

/// Returns the interpolated percentile from a slice that is already sorted in
/// ascending order. `percentile` is a fraction in `[0, 1]`.
pub fn percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    let (Some(first), Some(last)) = (sorted_values.first(), sorted_values.last()) else {
        return 0.0;
    };
    if percentile.is_nan() || percentile <= 0.0 {
        return *first;
    }
    if percentile >= 1.0 {
        return *last;
    }

    let position = (sorted_values.len() - 1) as f64 * percentile;
    let lower_index = position.floor() as usize;
    let upper_index = position.ceil() as usize;
    let weight = position - lower_index as f64;
    let lower = sorted_values[lower_index];
    let upper = sorted_values.get(upper_index).copied().unwrap_or(lower);
    lower + (upper - lower) * weight
}

/// Returns an ascending copy of `values`. Equal values keep their order.
pub fn sort_numbers(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}
