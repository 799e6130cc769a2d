use serde::{Deserialize, Serialize};

/// Caller supplied simulation settings.
///
/// Every field is optional and the numeric ones are kept as `f64` so that any
/// number a caller sends can be normalized instead of rejected. See
/// [`crate::services::normalize`] for how each field is sanitized.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_targets: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_levels: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub histogram_bin_count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_deal_impacts: Option<bool>,
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations as f64);
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(f64::from(seed));
        self
    }

    pub fn with_revenue_targets(mut self, targets: &[f64]) -> Self {
        self.revenue_targets = Some(targets.to_vec());
        self
    }

    pub fn with_confidence_levels(mut self, levels: &[f64]) -> Self {
        self.confidence_levels = Some(levels.to_vec());
        self
    }

    pub fn with_histogram_bin_count(mut self, bins: usize) -> Self {
        self.histogram_bin_count = Some(bins as f64);
        self
    }

    pub fn with_deal_impacts(mut self, include: bool) -> Self {
        self.include_deal_impacts = Some(include);
        self
    }
}
