//! CLI for the predecir pipeline
//!
//! Four commands cover the offline and online halves of the system:
//! `train` and `validate` for the batch side, `predict` and `drift` for
//! serving and monitoring.

mod commands;
mod logging;

pub use commands::run_command;
pub use logging::LogLevel;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Churn prediction pipeline
#[derive(Parser, Debug, Clone)]
#[command(name = "predecir")]
#[command(version)]
#[command(about = "Churn prediction: feature alignment, training, serving, drift monitoring")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors and results
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a model from YAML configuration
    Train(TrainArgs),

    /// Validate a configuration file without training
    Validate(ValidateArgs),

    /// Predict churn probability for one raw record
    Predict(PredictArgs),

    /// Compare a reference table against observed data for drift
    Drift(DriftArgs),
}

/// Arguments for the train command
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

/// Arguments for the predict command
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Path to the model artifact
    #[arg(long)]
    pub model: PathBuf,

    /// Path to the feature-columns artifact
    #[arg(long)]
    pub columns: Option<PathBuf>,

    /// JSON file holding one raw record
    #[arg(long)]
    pub input: PathBuf,

    /// Append the prediction to this JSONL log
    #[arg(long)]
    pub log: Option<PathBuf>,
}

/// Arguments for the drift command
#[derive(Parser, Debug, Clone)]
pub struct DriftArgs {
    /// Reference (training) CSV
    #[arg(long)]
    pub reference: PathBuf,

    /// Observed CSV to compare against the reference
    #[arg(long, conflicts_with = "log")]
    pub observed: Option<PathBuf>,

    /// Prediction log whose inputs form the observed table
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// Significance threshold for the KS test
    #[arg(long, default_value_t = 0.05)]
    pub threshold: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_train() {
        let cli = Cli::try_parse_from(["predecir", "train", "config.yaml"]).unwrap();
        match cli.command {
            Command::Train(args) => assert_eq!(args.config, PathBuf::from("config.yaml")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parses_drift_with_threshold() {
        let cli = Cli::try_parse_from([
            "predecir",
            "drift",
            "--reference",
            "train.csv",
            "--log",
            "predictions.log",
            "--threshold",
            "0.01",
        ])
        .unwrap();
        match cli.command {
            Command::Drift(args) => {
                assert_eq!(args.threshold, 0.01);
                assert!(args.observed.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_observed_and_log_together() {
        let result = Cli::try_parse_from([
            "predecir",
            "drift",
            "--reference",
            "train.csv",
            "--observed",
            "obs.csv",
            "--log",
            "predictions.log",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from(["predecir", "-v", "validate", "c.yaml"]).unwrap();
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }
}
