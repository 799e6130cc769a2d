use std::process::ExitCode;

use pipeline_forecast::services::request_file::load_request_from_file;
use pipeline_forecast::services::validation::validate_request;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_validation_issues;

pub fn validate_command(cmd: Commands) -> ExitCode {
    if let Commands::Validate { input } = cmd {
        let payload = match load_request_from_file(&input) {
            Ok(payload) => payload,
            Err(e) => {
                eprintln!("Failed to load request file: {e}");
                return ExitCode::FAILURE;
            }
        };

        return match validate_request(&payload) {
            Ok(request) => {
                println!("Payload is valid: {} deals", request.deals.len());
                ExitCode::SUCCESS
            }
            Err(issues) => {
                eprintln!(
                    "{}",
                    format_validation_issues("Invalid simulation payload", &issues)
                );
                ExitCode::FAILURE
            }
        };
    }
    ExitCode::FAILURE
}
