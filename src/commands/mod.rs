pub mod base_commands;
pub mod report_format;
pub mod simulate_cmd;
pub mod validate_cmd;

use pipeline_forecast::services::histogram::HistogramError;
use pipeline_forecast::services::request_file::RequestFileError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Request(#[from] RequestFileError),
    #[error("{0}")]
    Rejected(String),
    #[error("failed to serialize simulation result: {0}")]
    SerializeYaml(#[from] serde_yaml::Error),
    #[error("failed to serialize simulation result: {0}")]
    SerializeJson(#[from] serde_json::Error),
    #[error("failed to write simulation output: {0}")]
    Write(#[from] std::io::Error),
    #[error(transparent)]
    Histogram(#[from] HistogramError),
}
