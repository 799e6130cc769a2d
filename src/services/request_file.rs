use std::io;
use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RequestFileError {
    #[error("failed to read request file: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse request yaml: {0}")]
    ParseYaml(#[from] serde_yaml::Error),
    #[error("failed to parse request json: {0}")]
    ParseJson(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    Json,
    Yaml,
}

impl PayloadFormat {
    /// `.json` files are JSON, everything else is read as YAML.
    pub fn from_path(path: &str) -> Self {
        let is_json = Path::new(path)
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        if is_json {
            PayloadFormat::Json
        } else {
            PayloadFormat::Yaml
        }
    }
}

/// Simulation settings given on the command line. They replace the matching
/// keys of the payload's `config` section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub iterations: Option<usize>,
    pub seed: Option<u64>,
    pub revenue_targets: Vec<f64>,
    pub confidence_levels: Vec<f64>,
    pub histogram_bin_count: Option<usize>,
    pub include_deal_impacts: Option<bool>,
}

impl ConfigOverrides {
    fn entries(&self) -> Vec<(&'static str, Value)> {
        let mut entries = Vec::new();
        if let Some(iterations) = self.iterations {
            entries.push(("iterations", Value::from(iterations)));
        }
        if let Some(seed) = self.seed {
            entries.push(("seed", Value::from(seed)));
        }
        if !self.revenue_targets.is_empty() {
            entries.push(("revenueTargets", Value::from(self.revenue_targets.clone())));
        }
        if !self.confidence_levels.is_empty() {
            entries.push(("confidenceLevels", Value::from(self.confidence_levels.clone())));
        }
        if let Some(bins) = self.histogram_bin_count {
            entries.push(("histogramBinCount", Value::from(bins)));
        }
        if let Some(include) = self.include_deal_impacts {
            entries.push(("includeDealImpacts", Value::from(include)));
        }
        entries
    }
}

pub fn load_request_from_file(path: &str) -> Result<Value, RequestFileError> {
    let contents = std::fs::read_to_string(path)?;
    deserialize_request_from_str(&contents, PayloadFormat::from_path(path))
}

pub fn deserialize_request_from_str(
    contents: &str,
    format: PayloadFormat,
) -> Result<Value, RequestFileError> {
    let payload = match format {
        PayloadFormat::Json => serde_json::from_str(contents)?,
        PayloadFormat::Yaml => serde_yaml::from_str(contents)?,
    };
    Ok(payload)
}

/// Writes the overrides into `payload.config`, creating the section when it
/// is missing. Payloads of the wrong shape are left alone for validation to
/// report.
pub fn apply_config_overrides(payload: &mut Value, overrides: &ConfigOverrides) {
    let entries = overrides.entries();
    if entries.is_empty() {
        return;
    }
    let Some(root) = payload.as_object_mut() else {
        return;
    };
    let config = root
        .entry("config")
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(config) = config.as_object_mut() else {
        return;
    };
    for (key, value) in entries {
        config.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_is_derived_from_extension() {
        assert_eq!(PayloadFormat::from_path("deals.json"), PayloadFormat::Json);
        assert_eq!(PayloadFormat::from_path("deals.JSON"), PayloadFormat::Json);
        assert_eq!(PayloadFormat::from_path("deals.yaml"), PayloadFormat::Yaml);
        assert_eq!(PayloadFormat::from_path("deals"), PayloadFormat::Yaml);
    }

    #[test]
    fn yaml_payload_becomes_json_value() {
        let yaml = "deals:\n  - name: Northern Corp\n    amount: 120000\n    winProbability: 0.6\n    expectedCloseDate: 2025-11-15\nconfig:\n  seed: 1337\n";
        let payload = deserialize_request_from_str(yaml, PayloadFormat::Yaml).unwrap();

        assert_eq!(payload["deals"][0]["amount"], 120000);
        assert_eq!(payload["deals"][0]["expectedCloseDate"], "2025-11-15");
        assert_eq!(payload["config"]["seed"], 1337);
    }

    #[test]
    fn invalid_json_is_reported() {
        let error = deserialize_request_from_str("{", PayloadFormat::Json).unwrap_err();
        assert!(matches!(error, RequestFileError::ParseJson(_)));
    }

    #[test]
    fn overrides_replace_and_create_config_keys() {
        let mut payload = json!({ "deals": [], "config": { "iterations": 500, "seed": 1 } });
        let overrides = ConfigOverrides {
            seed: Some(42),
            revenue_targets: vec![100_000.0],
            include_deal_impacts: Some(false),
            ..ConfigOverrides::default()
        };
        apply_config_overrides(&mut payload, &overrides);

        assert_eq!(payload["config"]["iterations"], 500);
        assert_eq!(payload["config"]["seed"], 42);
        assert_eq!(payload["config"]["revenueTargets"], json!([100_000.0]));
        assert_eq!(payload["config"]["includeDealImpacts"], false);
    }

    #[test]
    fn overrides_create_missing_config_section() {
        let mut payload = json!({ "deals": [] });
        let overrides = ConfigOverrides {
            histogram_bin_count: Some(12),
            ..ConfigOverrides::default()
        };
        apply_config_overrides(&mut payload, &overrides);
        assert_eq!(payload["config"], json!({ "histogramBinCount": 12 }));
    }

    #[test]
    fn empty_overrides_leave_payload_untouched() {
        let mut payload = json!({ "deals": [] });
        apply_config_overrides(&mut payload, &ConfigOverrides::default());
        assert_eq!(payload, json!({ "deals": [] }));
    }
}
