//! Sanitizers for simulation input.
//!
//! Every function here is total: malformed values are mapped onto a safe,
//! documented value instead of producing an error.

use chrono::Utc;

use crate::domain::config::SimulationConfig;
use crate::domain::deal::Deal;

pub const DEFAULT_SIMULATION_ITERATIONS: usize = 10_000;
pub const MIN_SIMULATION_ITERATIONS: usize = 100;
pub const MAX_SIMULATION_ITERATIONS: usize = 200_000;
pub const DEFAULT_CONFIDENCE_LEVELS: [f64; 3] = [0.5, 0.8, 0.95];
pub const DEFAULT_HISTOGRAM_BIN_COUNT: usize = 40;
pub const MIN_HISTOGRAM_BIN_COUNT: usize = 5;
pub const MAX_HISTOGRAM_BIN_COUNT: usize = 200;
pub const DEFAULT_INCLUDE_DEAL_IMPACTS: bool = true;

const UINT32_MAX: u64 = 0xFFFF_FFFF;
const UINT32_RANGE: f64 = 4_294_967_296.0;

/// A [`SimulationConfig`] after every field has been sanitized.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedConfig {
    pub iterations: usize,
    pub seed: u32,
    pub revenue_targets: Vec<f64>,
    pub confidence_levels: Vec<f64>,
    pub histogram_bin_count: usize,
    pub include_deal_impacts: bool,
}

impl NormalizedConfig {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            iterations: normalize_iterations(config),
            seed: normalize_seed(config.seed),
            revenue_targets: config.revenue_targets.clone().unwrap_or_default(),
            confidence_levels: normalize_confidence_levels(config.confidence_levels.as_deref()),
            histogram_bin_count: normalize_histogram_bin_count(config.histogram_bin_count),
            include_deal_impacts: config
                .include_deal_impacts
                .unwrap_or(DEFAULT_INCLUDE_DEAL_IMPACTS),
        }
    }
}

pub fn normalize_iterations(config: &SimulationConfig) -> usize {
    let iterations = config
        .iterations
        .unwrap_or(DEFAULT_SIMULATION_ITERATIONS as f64);
    clamp_integer(
        iterations,
        MIN_SIMULATION_ITERATIONS as i64,
        MAX_SIMULATION_ITERATIONS as i64,
    ) as usize
}

/// Keeps finite levels strictly inside `(0, 1)`, sorted ascending without
/// duplicates. Falls back to [`DEFAULT_CONFIDENCE_LEVELS`] when nothing usable
/// remains.
pub fn normalize_confidence_levels(levels: Option<&[f64]>) -> Vec<f64> {
    let mut normalized: Vec<f64> = levels
        .unwrap_or_default()
        .iter()
        .copied()
        .filter(|level| level.is_finite() && *level > 0.0 && *level < 1.0)
        .collect();
    normalized.sort_by(f64::total_cmp);
    normalized.dedup();

    if normalized.is_empty() {
        DEFAULT_CONFIDENCE_LEVELS.to_vec()
    } else {
        normalized
    }
}

pub fn normalize_histogram_bin_count(bin_count: Option<f64>) -> usize {
    match bin_count {
        Some(value) if value.is_finite() => clamp_integer(
            value,
            MIN_HISTOGRAM_BIN_COUNT as i64,
            MAX_HISTOGRAM_BIN_COUNT as i64,
        ) as usize,
        _ => DEFAULT_HISTOGRAM_BIN_COUNT,
    }
}

/// Wraps a finite, non-negative seed onto `u32`; anything else derives a
/// seed from the current time.
pub fn normalize_seed(seed: Option<f64>) -> u32 {
    match seed {
        Some(value) if value.is_finite() && value >= 0.0 => {
            (value.floor() % UINT32_RANGE) as u32
        }
        _ => time_derived_seed(),
    }
}

fn time_derived_seed() -> u32 {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    (millis % UINT32_MAX) as u32
}

/// Non-finite probabilities count as zero.
pub fn clamp_probability(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Non-finite values map to `min`; everything else is clamped then floored.
pub fn clamp_integer(value: f64, min: i64, max: i64) -> i64 {
    if !value.is_finite() {
        return min;
    }
    value.clamp(min as f64, max as f64).floor() as i64
}

/// Copies the deals with their win probability clamped into `[0, 1]`.
pub fn sanitize_deals(deals: &[Deal]) -> Vec<Deal> {
    deals
        .iter()
        .map(|deal| Deal {
            win_probability: clamp_probability(deal.win_probability),
            ..deal.clone()
        })
        .collect()
}
