use serde::{Deserialize, Serialize};

pub type DealId = String;

/// A single opportunity in the sales pipeline.
///
/// `expected_close_date`, `stage`, `owner` and `notes` are carried along for
/// the caller and never influence the simulation.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: DealId,
    pub name: String,
    pub amount: f64,
    pub win_probability: f64,
    pub expected_close_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Deal {
    pub fn new(id: &str, name: &str, amount: f64, win_probability: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            amount,
            win_probability,
            ..Self::default()
        }
    }

    pub fn with_close_date(mut self, expected_close_date: &str) -> Self {
        self.expected_close_date = expected_close_date.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deal_serializes_with_camel_case_keys_and_skips_missing_optionals() {
        let deal = Deal::new("deal-1", "Expansion - Northern Corp", 120_000.0, 0.6)
            .with_close_date("2025-11-15");

        let json = serde_json::to_value(&deal).unwrap();
        assert_eq!(json["winProbability"], 0.6);
        assert_eq!(json["expectedCloseDate"], "2025-11-15");
        assert!(json.get("stage").is_none());
        assert!(json.get("owner").is_none());
    }

    #[test]
    fn deal_deserializes_optional_fields() {
        let yaml = "id: deal-2\nname: Horizon Labs\namount: 80000\nwinProbability: 0.35\nexpectedCloseDate: 2025-12-01\nstage: Proposal\n";
        let deal: Deal = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(deal.id, "deal-2");
        assert_eq!(deal.amount, 80_000.0);
        assert_eq!(deal.stage.as_deref(), Some("Proposal"));
        assert_eq!(deal.notes, None);
    }
}
