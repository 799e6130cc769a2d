//! Schema validation for simulation requests arriving from outside the
//! process.
//!
//! The engine itself never rejects input; this layer is for hosts that want
//! to refuse malformed payloads with a precise list of problems instead.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::config::SimulationConfig;
use crate::domain::deal::Deal;

pub const MAX_DEALS: usize = 500;
pub const MAX_AMOUNT: f64 = 1_000_000_000.0;
pub const MAX_REVENUE_TARGETS: usize = 20;
pub const MAX_CONFIDENCE_LEVELS: usize = 10;
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

const REQUEST_KEYS: [&str; 2] = ["deals", "config"];
const DEAL_KEYS: [&str; 8] = [
    "id",
    "name",
    "amount",
    "winProbability",
    "expectedCloseDate",
    "stage",
    "owner",
    "notes",
];
const CONFIG_KEYS: [&str; 6] = [
    "iterations",
    "seed",
    "revenueTargets",
    "confidenceLevels",
    "histogramBinCount",
    "includeDealImpacts",
];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    TooSmall,
    TooBig,
    NotInteger,
    UnrecognizedKeys,
    InvalidDate,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::InvalidType => "invalid_type",
            IssueCode::TooSmall => "too_small",
            IssueCode::TooBig => "too_big",
            IssueCode::NotInteger => "not_integer",
            IssueCode::UnrecognizedKeys => "unrecognized_keys",
            IssueCode::InvalidDate => "invalid_date",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub path: String,
    pub code: IssueCode,
    pub message: String,
}

/// A payload that passed validation, with deals trimmed and identified.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRequest {
    pub deals: Vec<Deal>,
    pub config: SimulationConfig,
}

struct TextRule {
    min: usize,
    max: usize,
    too_short: &'static str,
    too_long: &'static str,
}

struct NumberRule {
    min: f64,
    max: f64,
    integer: bool,
    too_small: &'static str,
    too_big: &'static str,
}

const ID_RULE: TextRule = TextRule {
    min: 1,
    max: 120,
    too_short: "id must not be empty",
    too_long: "id must be 120 characters or fewer",
};
const NAME_RULE: TextRule = TextRule {
    min: 1,
    max: 160,
    too_short: "name is required",
    too_long: "name must be 160 characters or fewer",
};
const CLOSE_DATE_RULE: TextRule = TextRule {
    min: 1,
    max: 50,
    too_short: "expectedCloseDate is required",
    too_long: "expectedCloseDate must be 50 characters or fewer",
};
const STAGE_RULE: TextRule = TextRule {
    min: 1,
    max: 80,
    too_short: "stage must not be empty",
    too_long: "stage must be 80 characters or fewer",
};
const OWNER_RULE: TextRule = TextRule {
    min: 1,
    max: 80,
    too_short: "owner must not be empty",
    too_long: "owner must be 80 characters or fewer",
};
const NOTES_RULE: TextRule = TextRule {
    min: 0,
    max: 1_000,
    too_short: "",
    too_long: "notes must be 1,000 characters or fewer",
};

const AMOUNT_RULE: NumberRule = NumberRule {
    min: 0.0,
    max: MAX_AMOUNT,
    integer: false,
    too_small: "amount must be non-negative",
    too_big: "amount exceeds supported maximum",
};
const WIN_PROBABILITY_RULE: NumberRule = NumberRule {
    min: 0.0,
    max: 1.0,
    integer: false,
    too_small: "winProbability must be at least 0",
    too_big: "winProbability must be at most 1",
};
const ITERATIONS_RULE: NumberRule = NumberRule {
    min: 100.0,
    max: 200_000.0,
    integer: true,
    too_small: "iterations must be at least 100",
    too_big: "iterations must be 200,000 or fewer",
};
const SEED_RULE: NumberRule = NumberRule {
    min: 0.0,
    max: MAX_SAFE_INTEGER,
    integer: true,
    too_small: "seed must be non-negative",
    too_big: "seed exceeds supported maximum",
};
const BIN_COUNT_RULE: NumberRule = NumberRule {
    min: 5.0,
    max: 200.0,
    integer: true,
    too_small: "histogramBinCount must be at least 5",
    too_big: "histogramBinCount must be 200 or fewer",
};
const REVENUE_TARGET_RULE: NumberRule = NumberRule {
    min: f64::MIN,
    max: f64::MAX,
    integer: false,
    too_small: "",
    too_big: "",
};
const CONFIDENCE_LEVEL_RULE: NumberRule = NumberRule {
    min: 0.0,
    max: 1.0,
    integer: false,
    too_small: "confidence level must be at least 0",
    too_big: "confidence level must be at most 1",
};

/// Checks `payload` against the request schema, reporting every problem
/// found rather than stopping at the first.
pub fn validate_request(payload: &Value) -> Result<SimulationRequest, Vec<ValidationIssue>> {
    let mut validator = Validator::default();
    let request = validator.request(payload);
    match request {
        Some(request) if validator.issues.is_empty() => Ok(request),
        _ => Err(validator.issues),
    }
}

fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

#[derive(Default)]
struct Validator {
    issues: Vec<ValidationIssue>,
}

impl Validator {
    fn issue(&mut self, path: &str, code: IssueCode, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            path: path.to_string(),
            code,
            message: message.into(),
        });
    }

    fn request(&mut self, payload: &Value) -> Option<SimulationRequest> {
        let map = self.object(payload, "", &REQUEST_KEYS, "request body")?;

        let deals = self.deals(map.get("deals"));
        let config = match map.get("config") {
            None => Some(SimulationConfig::default()),
            Some(value) => self.config(value),
        };

        Some(SimulationRequest {
            deals: deals?,
            config: config?,
        })
    }

    fn object<'v>(
        &mut self,
        value: &'v Value,
        path: &str,
        allowed: &[&str],
        label: &str,
    ) -> Option<&'v Map<String, Value>> {
        let Some(map) = value.as_object() else {
            self.issue(
                path,
                IssueCode::InvalidType,
                format!("{label} must be an object, received {}", type_name(value)),
            );
            return None;
        };

        let unknown: Vec<&str> = map
            .keys()
            .map(String::as_str)
            .filter(|key| !allowed.contains(key))
            .collect();
        if !unknown.is_empty() {
            self.issue(
                path,
                IssueCode::UnrecognizedKeys,
                format!("unrecognized keys: {}", unknown.join(", ")),
            );
        }
        Some(map)
    }

    fn deals(&mut self, value: Option<&Value>) -> Option<Vec<Deal>> {
        let Some(value) = value else {
            self.issue("deals", IssueCode::InvalidType, "deals is required");
            return None;
        };
        let Some(items) = value.as_array() else {
            self.issue(
                "deals",
                IssueCode::InvalidType,
                format!("deals must be an array, received {}", type_name(value)),
            );
            return None;
        };

        if items.is_empty() {
            self.issue("deals", IssueCode::TooSmall, "provide at least one deal");
        }
        if items.len() > MAX_DEALS {
            self.issue(
                "deals",
                IssueCode::TooBig,
                format!("no more than {MAX_DEALS} deals are supported"),
            );
        }

        let parsed: Vec<Option<Deal>> = items
            .iter()
            .enumerate()
            .map(|(index, item)| self.deal(item, index))
            .collect();
        parsed.into_iter().collect()
    }

    fn deal(&mut self, value: &Value, index: usize) -> Option<Deal> {
        let path = child_path("deals", &index.to_string());
        let map = self.object(value, &path, &DEAL_KEYS, "deal")?;

        let id = self.text(map, "id", &path, &ID_RULE, false);
        let name = self.text(map, "name", &path, &NAME_RULE, true);
        let amount = self.number(map, "amount", &path, &AMOUNT_RULE, true);
        let win_probability =
            self.number(map, "winProbability", &path, &WIN_PROBABILITY_RULE, true);
        let expected_close_date = self.close_date(map, &path);
        let stage = self.text(map, "stage", &path, &STAGE_RULE, false);
        let owner = self.text(map, "owner", &path, &OWNER_RULE, false);
        let notes = self.text(map, "notes", &path, &NOTES_RULE, false);

        Some(Deal {
            id: id.unwrap_or_else(|| format!("deal-{}", index + 1)),
            name: name?,
            amount: amount?,
            win_probability: win_probability?,
            expected_close_date: expected_close_date?,
            stage,
            owner,
            notes: notes.filter(|notes| !notes.is_empty()),
        })
    }

    fn close_date(&mut self, map: &Map<String, Value>, path: &str) -> Option<String> {
        let value = self.text(map, "expectedCloseDate", path, &CLOSE_DATE_RULE, true)?;
        if !is_iso_date(&value) {
            self.issue(
                &child_path(path, "expectedCloseDate"),
                IssueCode::InvalidDate,
                "expectedCloseDate must be an ISO-8601 date string",
            );
            return None;
        }
        Some(value)
    }

    fn config(&mut self, value: &Value) -> Option<SimulationConfig> {
        let path = "config";
        let map = self.object(value, path, &CONFIG_KEYS, "config")?;
        let issues_before = self.issues.len();

        let iterations = self.number(map, "iterations", path, &ITERATIONS_RULE, false);
        let seed = self.number(map, "seed", path, &SEED_RULE, false);
        let revenue_targets = self.number_list(
            map,
            "revenueTargets",
            &REVENUE_TARGET_RULE,
            MAX_REVENUE_TARGETS,
            "revenue targets",
        );
        let confidence_levels = self.number_list(
            map,
            "confidenceLevels",
            &CONFIDENCE_LEVEL_RULE,
            MAX_CONFIDENCE_LEVELS,
            "confidence levels",
        );
        let histogram_bin_count =
            self.number(map, "histogramBinCount", path, &BIN_COUNT_RULE, false);
        let include_deal_impacts = self.flag(map, "includeDealImpacts", path);

        if self.issues.len() > issues_before {
            return None;
        }
        Some(SimulationConfig {
            iterations,
            seed,
            revenue_targets,
            confidence_levels,
            histogram_bin_count,
            include_deal_impacts,
        })
    }

    fn text(
        &mut self,
        map: &Map<String, Value>,
        key: &str,
        parent: &str,
        rule: &TextRule,
        required: bool,
    ) -> Option<String> {
        let path = child_path(parent, key);
        let value = match map.get(key) {
            None if required => {
                self.issue(&path, IssueCode::InvalidType, format!("{key} is required"));
                return None;
            }
            None => return None,
            Some(value) => value,
        };
        let Some(text) = value.as_str() else {
            self.issue(
                &path,
                IssueCode::InvalidType,
                format!("{key} must be a string, received {}", type_name(value)),
            );
            return None;
        };

        let trimmed = text.trim();
        let length = trimmed.chars().count();
        if length < rule.min {
            self.issue(&path, IssueCode::TooSmall, rule.too_short);
            return None;
        }
        if length > rule.max {
            self.issue(&path, IssueCode::TooBig, rule.too_long);
            return None;
        }
        Some(trimmed.to_string())
    }

    fn number(
        &mut self,
        map: &Map<String, Value>,
        key: &str,
        parent: &str,
        rule: &NumberRule,
        required: bool,
    ) -> Option<f64> {
        let path = child_path(parent, key);
        match map.get(key) {
            None if required => {
                self.issue(&path, IssueCode::InvalidType, format!("{key} is required"));
                None
            }
            None => None,
            Some(value) => self.number_value(value, &path, key, rule),
        }
    }

    fn number_value(
        &mut self,
        value: &Value,
        path: &str,
        label: &str,
        rule: &NumberRule,
    ) -> Option<f64> {
        let Some(number) = value.as_f64() else {
            self.issue(
                path,
                IssueCode::InvalidType,
                format!("{label} must be a number, received {}", type_name(value)),
            );
            return None;
        };
        if rule.integer && number.fract() != 0.0 {
            self.issue(path, IssueCode::NotInteger, format!("{label} must be an integer"));
            return None;
        }
        if number < rule.min {
            self.issue(path, IssueCode::TooSmall, rule.too_small);
            return None;
        }
        if number > rule.max {
            self.issue(path, IssueCode::TooBig, rule.too_big);
            return None;
        }
        Some(number)
    }

    fn number_list(
        &mut self,
        map: &Map<String, Value>,
        key: &str,
        rule: &NumberRule,
        max_items: usize,
        label: &str,
    ) -> Option<Vec<f64>> {
        let path = child_path("config", key);
        let value = map.get(key)?;
        let Some(items) = value.as_array() else {
            self.issue(
                &path,
                IssueCode::InvalidType,
                format!("{key} must be an array, received {}", type_name(value)),
            );
            return None;
        };
        if items.len() > max_items {
            self.issue(
                &path,
                IssueCode::TooBig,
                format!("no more than {max_items} {label} are supported"),
            );
        }

        let values: Vec<Option<f64>> = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let item_path = child_path(&path, &index.to_string());
                self.number_value(item, &item_path, key, rule)
            })
            .collect();
        values.into_iter().collect()
    }

    fn flag(&mut self, map: &Map<String, Value>, key: &str, parent: &str) -> Option<bool> {
        let value = map.get(key)?;
        let flag = value.as_bool();
        if flag.is_none() {
            self.issue(
                &child_path(parent, key),
                IssueCode::InvalidType,
                format!("{key} must be a boolean, received {}", type_name(value)),
            );
        }
        flag
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

static ISO_DATE_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<date>[0-9]{4}-[0-9]{2}-[0-9]{2})(?:[T ](?P<time>[0-9]{2}:[0-9]{2}:[0-9]{2})(?:\.[0-9]{1,3})?(?:Z|[-+](?P<offset>[0-9]{2}:[0-9]{2}))?)?$",
    )
    .ok()
});

/// Accepts `YYYY-MM-DD`, optionally followed by `T` or a space and
/// `HH:MM:SS`, up to three fractional digits and a `Z` or `+HH:MM` offset.
/// The calendar date and the time of day must exist.
pub fn is_iso_date(value: &str) -> bool {
    let Some(captures) = ISO_DATE_PATTERN
        .as_ref()
        .and_then(|pattern| pattern.captures(value))
    else {
        return false;
    };

    let date_ok = captures
        .name("date")
        .is_some_and(|date| NaiveDate::parse_from_str(date.as_str(), "%Y-%m-%d").is_ok());
    let time_ok = captures
        .name("time")
        .is_none_or(|time| is_clock_time(time.as_str(), "%H:%M:%S"));
    let offset_ok = captures
        .name("offset")
        .is_none_or(|offset| is_clock_time(offset.as_str(), "%H:%M"));

    date_ok && time_ok && offset_ok
}

/// Leap seconds parse in chrono but are not a valid wall-clock time here.
fn is_clock_time(value: &str, format: &str) -> bool {
    NaiveTime::parse_from_str(value, format).is_ok_and(|time| time.nanosecond() < 1_000_000_000)
}
