mod commands;
mod tracing_setup;

use std::process::ExitCode;

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::simulate_cmd::simulate_command;
use crate::commands::validate_cmd::validate_command;
use clap::{CommandFactory, Parser};

fn main() -> ExitCode {
    tracing_setup::init_tracing();

    let args = CliArgs::parse();
    match args.command {
        cmd @ Commands::Simulate { .. } => simulate_command(cmd),
        cmd @ Commands::Validate { .. } => validate_command(cmd),
        Commands::Completions { shell } => {
            let mut command = CliArgs::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
            ExitCode::SUCCESS
        }
    }
}
