use pipeline_forecast::domain::config::SimulationConfig;
use pipeline_forecast::domain::deal::Deal;
use pipeline_forecast::services::histogram::compute_histogram;
use pipeline_forecast::services::percentiles::sort_numbers;
use pipeline_forecast::services::simulation::simulate_pipeline;
use pipeline_forecast::services::statistics::{confidence_intervals, target_probabilities};
use proptest::prelude::*;

fn deal_strategy() -> impl Strategy<Value = Deal> {
    (0.0..500_000.0_f64, -0.5..1.5_f64)
        .prop_map(|(amount, probability)| Deal::new("deal", "Generated deal", amount, probability))
}

fn pipeline_strategy() -> impl Strategy<Value = Vec<Deal>> {
    prop::collection::vec(deal_strategy(), 0..8).prop_map(|deals| {
        deals
            .into_iter()
            .enumerate()
            .map(|(index, deal)| Deal {
                id: format!("deal-{}", index + 1),
                ..deal
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn histogram_conserves_mass(
        samples in prop::collection::vec(-1.0e6..1.0e6_f64, 1..300),
        bins in 1usize..60,
    ) {
        let histogram = compute_histogram(&samples, bins);

        let counted: usize = histogram.iter().map(|bin| bin.count).sum();
        let mass: f64 = histogram.iter().map(|bin| bin.probability).sum();
        prop_assert_eq!(counted, samples.len());
        prop_assert!((mass - 1.0).abs() < 1e-9);
    }

    #[test]
    fn wider_confidence_levels_contain_narrower_ones(
        samples in prop::collection::vec(0.0..1.0e6_f64, 1..200),
        first in 0.01..0.99_f64,
        second in 0.01..0.99_f64,
    ) {
        let (narrow, wide) = if first <= second { (first, second) } else { (second, first) };
        let intervals = confidence_intervals(&samples, &[narrow, wide]);

        prop_assert!(intervals[1].lower <= intervals[0].lower);
        prop_assert!(intervals[1].upper >= intervals[0].upper);
        prop_assert!(intervals[0].lower <= intervals[0].upper);
    }

    #[test]
    fn target_survival_never_increases(
        samples in prop::collection::vec(0.0..1.0e6_f64, 1..200),
        targets in prop::collection::vec(-1.0e5..1.1e6_f64, 1..10),
    ) {
        let sorted = sort_numbers(&samples);
        let probabilities = target_probabilities(&sorted, &targets);

        for pair in probabilities.windows(2) {
            prop_assert!(pair[0].target < pair[1].target);
            prop_assert!(pair[0].probability >= pair[1].probability);
        }
        for target in &probabilities {
            prop_assert!((0.0..=1.0).contains(&target.probability));
        }
    }

    #[test]
    fn deal_impacts_stay_within_bounds(deals in pipeline_strategy(), seed in any::<u32>()) {
        let config = SimulationConfig::new().with_iterations(100).with_seed(seed);
        let result = simulate_pipeline(&deals, &config);

        prop_assert_eq!(result.deal_impacts.len(), deals.len());
        for (deal, impact) in deals.iter().zip(&result.deal_impacts) {
            prop_assert!(impact.expected_value >= 0.0);
            prop_assert!(impact.expected_value <= deal.amount + 1e-6);
            prop_assert!((0.0..=1.0).contains(&impact.sensitivity));
        }
    }

    #[test]
    fn seeded_runs_are_reproducible(deals in pipeline_strategy(), seed in any::<u32>()) {
        let config = SimulationConfig::new()
            .with_iterations(100)
            .with_seed(seed)
            .with_revenue_targets(&[50_000.0, 250_000.0]);

        let first = simulate_pipeline(&deals, &config);
        let second = simulate_pipeline(&deals, &config);

        prop_assert_eq!(&first.revenue_samples, &second.revenue_samples);
        prop_assert_eq!(&first.histogram, &second.histogram);
        prop_assert_eq!(&first.target_probabilities, &second.target_probabilities);
    }
}
