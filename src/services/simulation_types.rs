use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::deal::DealId;

/// Half-open `[start, end)` bucket; the last bucket also includes `end`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
    pub probability: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceInterval {
    pub level: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Probability that closed revenue meets or exceeds `target`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TargetProbability {
    pub target: f64,
    pub probability: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DealImpact {
    pub deal_id: DealId,
    pub expected_value: f64,
    pub variance_contribution: f64,
    /// Share of iterations in which this deal alone lifted revenue over the
    /// 80th percentile.
    pub sensitivity: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub mean: f64,
    pub median: f64,
    pub standard_deviation: f64,
    pub min: f64,
    pub max: f64,
    pub percentile10: f64,
    pub percentile90: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationMetadata {
    pub iterations: usize,
    pub seed: u32,
    pub generated_at: DateTime<Utc>,
    pub version: String,
    pub run_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub revenue_samples: Vec<f64>,
    pub histogram: Vec<HistogramBin>,
    pub confidence_intervals: Vec<ConfidenceInterval>,
    pub target_probabilities: Vec<TargetProbability>,
    pub deal_impacts: Vec<DealImpact>,
    pub summary: SimulationSummary,
    pub metadata: SimulationMetadata,
}
