use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate closed revenue for a pipeline of deals
    Simulate {
        /// Request file with deals and optional config (YAML or JSON)
        #[arg(short, long)]
        input: String,
        /// Output file for the simulation result (.json for JSON, YAML otherwise)
        #[arg(short, long)]
        output: String,
        /// Number of simulation iterations
        #[arg(short = 'n', long)]
        iterations: Option<usize>,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// Revenue target to report the probability of reaching (repeatable)
        #[arg(short, long = "target")]
        targets: Vec<f64>,
        /// Confidence level between 0 and 1 (repeatable)
        #[arg(short, long = "confidence")]
        confidence_levels: Vec<f64>,
        /// Number of histogram bins
        #[arg(short, long)]
        bins: Option<usize>,
        /// Skip the per-deal impact analysis
        #[arg(long)]
        no_deal_impacts: bool,
        /// Optional PNG file for the revenue histogram
        #[arg(long)]
        histogram: Option<String>,
    },
    /// Check a request file without running a simulation
    Validate {
        /// Request file with deals and optional config (YAML or JSON)
        #[arg(short, long)]
        input: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulate_leaves_config_flags_unset_by_default() {
        let args = CliArgs::parse_from([
            "pipeline-forecast",
            "simulate",
            "-i",
            "deals.yaml",
            "-o",
            "result.yaml",
        ]);

        if let Commands::Simulate {
            iterations,
            seed,
            targets,
            confidence_levels,
            bins,
            no_deal_impacts,
            histogram,
            ..
        } = args.command
        {
            assert_eq!(iterations, None);
            assert_eq!(seed, None);
            assert!(targets.is_empty());
            assert!(confidence_levels.is_empty());
            assert_eq!(bins, None);
            assert!(!no_deal_impacts);
            assert_eq!(histogram, None);
        } else {
            panic!("expected simulate command");
        }
    }

    #[test]
    fn simulate_collects_repeated_targets_and_levels() {
        let args = CliArgs::parse_from([
            "pipeline-forecast",
            "simulate",
            "-i",
            "deals.yaml",
            "-o",
            "result.yaml",
            "-t",
            "100000",
            "--target",
            "150000",
            "-c",
            "0.9",
            "-n",
            "2000",
            "--seed",
            "1337",
            "--no-deal-impacts",
        ]);

        if let Commands::Simulate {
            iterations,
            seed,
            targets,
            confidence_levels,
            no_deal_impacts,
            ..
        } = args.command
        {
            assert_eq!(iterations, Some(2000));
            assert_eq!(seed, Some(1337));
            assert_eq!(targets, vec![100_000.0, 150_000.0]);
            assert_eq!(confidence_levels, vec![0.9]);
            assert!(no_deal_impacts);
        } else {
            panic!("expected simulate command");
        }
    }
}
