//! Predecir CLI
//!
//! Entry point for the churn-prediction pipeline.
//!
//! # Usage
//!
//! ```bash
//! # Train from config
//! predecir train config.yaml
//!
//! # Validate config
//! predecir validate config.yaml
//!
//! # Predict one record
//! predecir predict --model models/model.json \
//!     --columns models/feature_columns.json \
//!     --input payload.json --log monitoring/predictions.log
//!
//! # Check production inputs for drift
//! predecir drift --reference data/processed/train.csv \
//!     --log monitoring/predictions.log
//! ```

use clap::Parser;
use predecir::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
