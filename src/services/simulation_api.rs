use std::time::Instant;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::services::simulation::simulate_pipeline;
use crate::services::simulation_types::SimulationResult;
use crate::services::validation::{ValidationIssue, validate_request};

const JSON_MEDIA_TYPE: &str = "application/json";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// The body could not be parsed at all.
    MalformedInput,
    /// The body parsed but did not match the request schema.
    SchemaViolation,
    UnsupportedMediaType,
}

impl ApiErrorKind {
    pub fn status(&self) -> u16 {
        match self {
            ApiErrorKind::MalformedInput | ApiErrorKind::SchemaViolation => 400,
            ApiErrorKind::UnsupportedMediaType => 415,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationApiError {
    pub kind: ApiErrorKind,
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ValidationIssue>,
}

impl SimulationApiError {
    pub fn new(kind: ApiErrorKind, message: &str, issues: Vec<ValidationIssue>) -> Self {
        Self {
            kind,
            status: kind.status(),
            message: message.to_string(),
            issues,
        }
    }
}

/// Outcome of one simulation request, tagged with `outcome` when serialized.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SimulationResponse {
    Success {
        result: Box<SimulationResult>,
        #[serde(rename = "durationMs")]
        duration_ms: f64,
    },
    Error(SimulationApiError),
}

impl SimulationResponse {
    pub fn status(&self) -> u16 {
        match self {
            SimulationResponse::Success { .. } => 200,
            SimulationResponse::Error(error) => error.status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SimulationResponse::Success { .. })
    }
}

/// Handles a raw request body the way the HTTP endpoint does: media type
/// check, JSON parsing, schema validation, then one simulation run with its
/// wall time stamped into the metadata.
pub fn handle_simulation_request(content_type: Option<&str>, body: &str) -> SimulationResponse {
    if !is_json_request(content_type) {
        warn!(?content_type, "rejected simulation request with unsupported media type");
        return SimulationResponse::Error(SimulationApiError::new(
            ApiErrorKind::UnsupportedMediaType,
            "Content-Type must be application/json",
            Vec::new(),
        ));
    }

    let payload: Value = match serde_json::from_str(body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "rejected unparseable simulation request");
            return SimulationResponse::Error(SimulationApiError::new(
                ApiErrorKind::MalformedInput,
                "Invalid JSON body",
                Vec::new(),
            ));
        }
    };

    respond_to_payload(&payload)
}

/// Validates an already parsed payload and runs the simulation.
pub fn respond_to_payload(payload: &Value) -> SimulationResponse {
    let request = match validate_request(payload) {
        Ok(request) => request,
        Err(issues) => {
            warn!(issues = issues.len(), "rejected invalid simulation payload");
            return SimulationResponse::Error(SimulationApiError::new(
                ApiErrorKind::SchemaViolation,
                "Invalid simulation payload",
                issues,
            ));
        }
    };

    let started = Instant::now();
    let mut result = simulate_pipeline(&request.deals, &request.config);
    result.metadata.stamp_duration(started.elapsed());
    let duration_ms = result.metadata.duration_ms.unwrap_or_default();

    info!(
        run_id = %result.metadata.run_id,
        deals = request.deals.len(),
        iterations = result.metadata.iterations,
        duration_ms,
        "simulation request handled"
    );

    SimulationResponse::Success {
        result: Box::new(result),
        duration_ms,
    }
}

fn is_json_request(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|value| value.to_ascii_lowercase().contains(JSON_MEDIA_TYPE))
}
