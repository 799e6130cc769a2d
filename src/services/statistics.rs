use crate::services::percentiles::{percentile, sort_numbers};
use crate::services::simulation_types::{ConfidenceInterval, SimulationSummary, TargetProbability};

const TAIL_SUMMARY_LOW: f64 = 0.1;
const TAIL_SUMMARY_HIGH: f64 = 0.9;

/// Descriptive statistics for unsorted samples. Empty input gives an
/// all-zero summary.
pub fn summary_statistics(samples: &[f64]) -> SimulationSummary {
    summary_statistics_sorted(&sort_numbers(samples))
}

/// Same as [`summary_statistics`] for input that is already sorted ascending.
/// The standard deviation uses the population divisor `n`.
pub fn summary_statistics_sorted(sorted: &[f64]) -> SimulationSummary {
    let (Some(min), Some(max)) = (sorted.first(), sorted.last()) else {
        return SimulationSummary::default();
    };

    let count = sorted.len() as f64;
    let mean = sorted.iter().sum::<f64>() / count;
    let variance = sorted
        .iter()
        .map(|value| {
            let diff = value - mean;
            diff * diff
        })
        .sum::<f64>()
        / count;

    SimulationSummary {
        mean,
        median: percentile(sorted, 0.5),
        standard_deviation: variance.sqrt(),
        min: *min,
        max: *max,
        percentile10: percentile(sorted, TAIL_SUMMARY_LOW),
        percentile90: percentile(sorted, TAIL_SUMMARY_HIGH),
    }
}

pub fn confidence_intervals(samples: &[f64], levels: &[f64]) -> Vec<ConfidenceInterval> {
    confidence_intervals_sorted(&sort_numbers(samples), levels)
}

/// Symmetric intervals: the lower bound sits at `(1 - level) / 2`, the upper
/// bound at `1 - (1 - level) / 2`. Empty samples give `(0, 0)` per level.
pub fn confidence_intervals_sorted(sorted: &[f64], levels: &[f64]) -> Vec<ConfidenceInterval> {
    levels
        .iter()
        .map(|&level| {
            if sorted.is_empty() {
                return ConfidenceInterval {
                    level,
                    lower: 0.0,
                    upper: 0.0,
                };
            }
            let tail = (1.0 - level) / 2.0;
            ConfidenceInterval {
                level,
                lower: percentile(sorted, tail),
                upper: percentile(sorted, 1.0 - tail),
            }
        })
        .collect()
}

/// Survival probability `P(revenue >= target)` for each distinct finite
/// target, in ascending target order.
pub fn target_probabilities(sorted: &[f64], targets: &[f64]) -> Vec<TargetProbability> {
    if targets.is_empty() || sorted.is_empty() {
        return Vec::new();
    }

    let mut unique_targets: Vec<f64> = targets
        .iter()
        .copied()
        .filter(|target| target.is_finite())
        .collect();
    unique_targets.sort_by(f64::total_cmp);
    unique_targets.dedup();

    let total = sorted.len();
    unique_targets
        .into_iter()
        .map(|target| {
            let index = lower_bound(sorted, target);
            TargetProbability {
                target,
                probability: (total - index) as f64 / total as f64,
            }
        })
        .collect()
}

/// Index of the first element `>= target`.
fn lower_bound(sorted: &[f64], target: f64) -> usize {
    sorted.partition_point(|value| *value < target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn summary_of_empty_samples_is_all_zero() {
        assert_eq!(summary_statistics(&[]), SimulationSummary::default());
    }

    #[test]
    fn summary_uses_population_standard_deviation() {
        let summary = summary_statistics(&[4.0, 2.0, 8.0, 6.0]);

        assert_close(summary.mean, 5.0);
        assert_close(summary.median, 5.0);
        assert_close(summary.standard_deviation, 5.0_f64.sqrt());
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 8.0);
    }

    #[test]
    fn summary_reports_tail_percentiles() {
        let summary = summary_statistics(&[50.0, 10.0, 40.0, 20.0, 30.0]);
        assert_close(summary.percentile10, 14.0);
        assert_close(summary.percentile90, 46.0);
    }

    #[test]
    fn confidence_intervals_for_empty_samples_are_zero() {
        let intervals = confidence_intervals(&[], &[0.5, 0.8]);
        assert_eq!(intervals.len(), 2);
        assert!(intervals
            .iter()
            .all(|interval| interval.lower == 0.0 && interval.upper == 0.0));
        assert_eq!(intervals[1].level, 0.8);
    }

    #[test]
    fn confidence_intervals_widen_with_level() {
        let samples: Vec<f64> = (0..=100).map(f64::from).collect();
        let intervals = confidence_intervals(&samples, &[0.5, 0.8, 0.95]);

        assert_close(intervals[0].lower, 25.0);
        assert_close(intervals[0].upper, 75.0);
        assert_close(intervals[1].lower, 10.0);
        assert_close(intervals[1].upper, 90.0);
        assert!(intervals[2].lower <= intervals[1].lower);
        assert!(intervals[2].upper >= intervals[1].upper);
    }

    #[test]
    fn target_probabilities_are_empty_without_targets_or_samples() {
        assert!(target_probabilities(&[1.0, 2.0], &[]).is_empty());
        assert!(target_probabilities(&[], &[1.0]).is_empty());
    }

    #[test]
    fn target_probabilities_count_samples_at_or_above_target() {
        let sorted = [0.0, 100.0, 100.0, 200.0];
        let probabilities = target_probabilities(&sorted, &[200.0, 100.0, 100.0, 250.0, -5.0]);

        let targets: Vec<f64> = probabilities.iter().map(|p| p.target).collect();
        assert_eq!(targets, vec![-5.0, 100.0, 200.0, 250.0]);
        assert_eq!(probabilities[0].probability, 1.0);
        assert_eq!(probabilities[1].probability, 0.75);
        assert_eq!(probabilities[2].probability, 0.25);
        assert_eq!(probabilities[3].probability, 0.0);
    }

    #[test]
    fn target_probabilities_skip_non_finite_targets() {
        let probabilities = target_probabilities(&[1.0], &[f64::NAN, f64::INFINITY, 1.0]);
        assert_eq!(probabilities.len(), 1);
        assert_eq!(probabilities[0].probability, 1.0);
    }
}
