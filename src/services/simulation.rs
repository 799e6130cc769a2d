use tracing::debug;

use crate::domain::config::SimulationConfig;
use crate::domain::deal::Deal;
use crate::services::deal_impact::{DealImpactInput, DealTally, build_deal_impacts};
use crate::services::histogram::compute_histogram;
use crate::services::metadata::create_simulation_metadata;
use crate::services::normalize::{NormalizedConfig, sanitize_deals};
use crate::services::percentiles::sort_numbers;
use crate::services::seeded_rng::SeededRng;
use crate::services::simulation_types::SimulationResult;
use crate::services::statistics::{
    confidence_intervals_sorted, summary_statistics_sorted, target_probabilities,
};

/// Monte Carlo engine for a sales pipeline.
///
/// Each deal is an independent Bernoulli trial per iteration. The engine owns
/// its configuration; nothing is shared between runs, so engines can be used
/// from several threads at once.
#[derive(Debug, Clone, Default)]
pub struct SimulationEngine {
    config: SimulationConfig,
}

impl SimulationEngine {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs one simulation. The configuration is normalized per call, so a
    /// config without a seed gets a fresh time-derived seed every run.
    pub fn simulate(&self, deals: &[Deal]) -> SimulationResult {
        let settings = NormalizedConfig::from_config(&self.config);
        let mut rng = SeededRng::new(settings.seed);
        run_simulation_with_rng(deals, &settings, &mut rng)
    }
}

pub fn simulate_pipeline(deals: &[Deal], config: &SimulationConfig) -> SimulationResult {
    SimulationEngine::new(config.clone()).simulate(deals)
}

pub(crate) fn run_simulation_with_rng(
    deals: &[Deal],
    settings: &NormalizedConfig,
    rng: &mut SeededRng,
) -> SimulationResult {
    let deals = sanitize_deals(deals);
    let iterations = settings.iterations;

    debug!(
        deals = deals.len(),
        iterations,
        seed = settings.seed,
        "starting pipeline simulation"
    );

    let mut revenue_samples = vec![0.0_f64; iterations];
    let mut tallies = vec![DealTally::default(); deals.len()];

    for (iteration, revenue) in revenue_samples.iter_mut().enumerate() {
        *revenue = simulate_single_run(&deals, &mut tallies, iteration, rng);
    }

    let sorted_samples = sort_numbers(&revenue_samples);
    let histogram = compute_histogram(&revenue_samples, settings.histogram_bin_count);
    let summary = summary_statistics_sorted(&sorted_samples);
    let confidence_intervals =
        confidence_intervals_sorted(&sorted_samples, &settings.confidence_levels);
    let target_probabilities = target_probabilities(&sorted_samples, &settings.revenue_targets);
    let metadata = create_simulation_metadata(iterations, settings.seed);

    let deal_impacts = if settings.include_deal_impacts {
        build_deal_impacts(&DealImpactInput {
            deals: &deals,
            revenue_samples: &revenue_samples,
            sorted_samples: &sorted_samples,
            iterations,
            tallies: &tallies,
        })
    } else {
        Vec::new()
    };

    debug!(
        run_id = %metadata.run_id,
        mean = summary.mean,
        bins = histogram.len(),
        "pipeline simulation complete"
    );

    SimulationResult {
        revenue_samples,
        histogram,
        confidence_intervals,
        target_probabilities,
        deal_impacts,
        summary,
        metadata,
    }
}

/// Draws one Bernoulli trial per deal and returns the closed revenue.
fn simulate_single_run(
    deals: &[Deal],
    tallies: &mut [DealTally],
    iteration: usize,
    rng: &mut SeededRng,
) -> f64 {
    let mut total = 0.0;
    for (deal, tally) in deals.iter().zip(tallies.iter_mut()) {
        // Such a deal can never add revenue; skipping it saves a draw.
        if deal.win_probability == 0.0 || deal.amount == 0.0 {
            continue;
        }
        if rng.next_unit() < deal.win_probability {
            total += deal.amount;
            tally.record_win(iteration);
        }
    }
    total
}
