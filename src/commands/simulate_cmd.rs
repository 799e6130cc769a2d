use std::process::ExitCode;

use pipeline_forecast::services::histogram::write_histogram_png;
use pipeline_forecast::services::request_file::{
    ConfigOverrides, PayloadFormat, apply_config_overrides, load_request_from_file,
};
use pipeline_forecast::services::simulation_api::{SimulationResponse, respond_to_payload};
use pipeline_forecast::services::simulation_types::SimulationResult;
use tracing::info;

use crate::commands::CommandError;
use crate::commands::base_commands::Commands;
use crate::commands::report_format::{format_simulation_report, format_validation_issues};

pub fn simulate_command(cmd: Commands) -> ExitCode {
    if let Commands::Simulate {
        input,
        output,
        iterations,
        seed,
        targets,
        confidence_levels,
        bins,
        no_deal_impacts,
        histogram,
    } = cmd
    {
        let overrides = ConfigOverrides {
            iterations,
            seed,
            revenue_targets: targets,
            confidence_levels,
            histogram_bin_count: bins,
            include_deal_impacts: no_deal_impacts.then_some(false),
        };

        let result = match simulate_request_file(&input, &output, &overrides, histogram.as_deref())
        {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Failed to simulate pipeline: {e}");
                return ExitCode::FAILURE;
            }
        };

        println!("{}", format_simulation_report(&result));
        println!("Simulation result written to {output}");
        if let Some(path) = histogram {
            println!("Simulation histogram written to {path}");
        }
        return ExitCode::SUCCESS;
    }
    ExitCode::FAILURE
}

fn simulate_request_file(
    input: &str,
    output: &str,
    overrides: &ConfigOverrides,
    histogram_path: Option<&str>,
) -> Result<SimulationResult, CommandError> {
    let mut payload = load_request_from_file(input)?;
    apply_config_overrides(&mut payload, overrides);

    let result = match respond_to_payload(&payload) {
        SimulationResponse::Success { result, .. } => *result,
        SimulationResponse::Error(error) => {
            return Err(CommandError::Rejected(format_validation_issues(
                &error.message,
                &error.issues,
            )));
        }
    };

    std::fs::write(output, serialize_result(output, &result)?)?;
    info!(path = output, run_id = %result.metadata.run_id, "simulation result written");

    if let Some(path) = histogram_path {
        write_histogram_png(path, &result.histogram)?;
        info!(path, "simulation histogram written");
    }
    Ok(result)
}

fn serialize_result(output: &str, result: &SimulationResult) -> Result<String, CommandError> {
    let contents = match PayloadFormat::from_path(output) {
        PayloadFormat::Json => serde_json::to_string_pretty(result)?,
        PayloadFormat::Yaml => serde_yaml::to_string(result)?,
    };
    Ok(contents)
}
