use crate::domain::deal::Deal;
use crate::services::percentiles::percentile;
use crate::services::simulation_types::DealImpact;

/// Percentile of the revenue distribution used as the sensitivity cutoff.
pub const TAIL_THRESHOLD_PERCENTILE: f64 = 0.8;

/// Per-deal bookkeeping gathered by the engine while iterating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DealTally {
    pub wins: usize,
    pub winning_iterations: Vec<usize>,
}

impl DealTally {
    pub fn record_win(&mut self, iteration: usize) {
        self.wins += 1;
        self.winning_iterations.push(iteration);
    }
}

pub struct DealImpactInput<'a> {
    pub deals: &'a [Deal],
    pub revenue_samples: &'a [f64],
    pub sorted_samples: &'a [f64],
    pub iterations: usize,
    pub tallies: &'a [DealTally],
}

/// Expected value, Bernoulli variance contribution and tail sensitivity per
/// deal, using the observed win frequency as the deal's probability.
///
/// Sensitivity inspects each deal on its own: an iteration counts when the
/// total reaches the tail threshold but would fall below it without this
/// deal's amount, even if other deals also won in that iteration.
pub fn build_deal_impacts(input: &DealImpactInput<'_>) -> Vec<DealImpact> {
    if input.deals.is_empty() || input.iterations == 0 {
        return Vec::new();
    }

    let tail_threshold = percentile(input.sorted_samples, TAIL_THRESHOLD_PERCENTILE);
    let iterations = input.iterations as f64;

    input
        .deals
        .iter()
        .enumerate()
        .map(|(index, deal)| {
            let tally = input.tallies.get(index);
            let wins = tally.map_or(0, |tally| tally.wins);
            let win_frequency = wins as f64 / iterations;
            let variance_contribution =
                deal.amount * deal.amount * win_frequency * (1.0 - win_frequency);

            let sensitivity_hits = tally
                .map(|tally| tally.winning_iterations.as_slice())
                .unwrap_or_default()
                .iter()
                .filter_map(|iteration| input.revenue_samples.get(*iteration))
                .filter(|revenue| {
                    **revenue >= tail_threshold && **revenue - deal.amount < tail_threshold
                })
                .count();

            DealImpact {
                deal_id: deal.id.clone(),
                expected_value: win_frequency * deal.amount,
                variance_contribution,
                sensitivity: sensitivity_hits as f64 / iterations,
            }
        })
        .collect()
}
