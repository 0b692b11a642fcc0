//! CLI command implementations

use super::logging::{log, LogLevel};
use super::{Cli, Command, DriftArgs, PredictArgs, TrainArgs, ValidateArgs};
use crate::config::{load_config, validate_config};
use crate::drift::DriftDetector;
use crate::error::{Error, Result};
use crate::frame::{read_csv, RawRecord};
use crate::monitor::PredictionLog;
use crate::predict::Predictor;
use crate::schema::FeatureSchema;
use crate::train::train_from_config;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<()> {
    let level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };

    match cli.command {
        Command::Train(args) => run_train(args, level),
        Command::Validate(args) => run_validate(args, level),
        Command::Predict(args) => run_predict(args, level),
        Command::Drift(args) => run_drift(args, level),
    }
}

fn run_train(args: TrainArgs, level: LogLevel) -> Result<()> {
    let schema = FeatureSchema::telco();
    let report = train_from_config(&args.config, &schema)?;

    log(level, LogLevel::Normal, "✓ Training complete");
    log(level, LogLevel::Normal, &format!("  Accuracy: {:.4}", report.accuracy));
    log(
        level,
        LogLevel::Normal,
        &format!("  Rows: {} train / {} test", report.train_rows, report.test_rows),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!("  Feature columns: {:?}", report.feature_columns.names()),
    );
    log(level, LogLevel::Normal, &format!("  Model: {}", report.model_path.display()));
    log(
        level,
        LogLevel::Normal,
        &format!("  Feature columns artifact: {}", report.columns_path.display()),
    );
    Ok(())
}

fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<()> {
    let spec = load_config(&args.config)?;
    validate_config(&spec).map_err(|e| Error::Config(format!("invalid config: {e}")))?;

    log(level, LogLevel::Normal, "✓ Configuration is valid");
    log(level, LogLevel::Normal, &format!("  Data: {}", spec.data.input_path.display()));
    log(level, LogLevel::Normal, &format!("  Test size: {}", spec.training.test_size));
    log(level, LogLevel::Normal, &format!("  Model type: {}", spec.model.kind));
    Ok(())
}

fn run_predict(args: PredictArgs, level: LogLevel) -> Result<()> {
    let schema = FeatureSchema::telco();
    let predictor = Predictor::from_artifacts(&args.model, args.columns.as_deref(), schema)?;

    let payload = std::fs::read_to_string(&args.input)
        .map_err(|e| Error::Data(format!("cannot read payload {}: {e}", args.input.display())))?;
    let record: RawRecord = serde_json::from_str(&payload)
        .map_err(|e| Error::Data(format!("payload is not a JSON object of scalars: {e}")))?;

    let probability = predictor.predict(&record)?;

    if let Some(path) = &args.log {
        PredictionLog::new(path).append(&record, probability)?;
        log(level, LogLevel::Verbose, &format!("  Logged to {}", path.display()));
    }

    println!("{}", serde_json::json!({ "churn_probability": probability }));
    Ok(())
}

fn run_drift(args: DriftArgs, level: LogLevel) -> Result<()> {
    let schema = FeatureSchema::telco();
    let reference = read_csv(&args.reference)?;

    let observed = match (&args.observed, &args.log) {
        (Some(path), None) => read_csv(path)?,
        (None, Some(path)) => PredictionLog::new(path).read_inputs()?,
        _ => {
            return Err(Error::Config(
                "provide an observed table via --observed or --log".to_string(),
            ))
        }
    };

    let detector = DriftDetector::new(schema).with_threshold(args.threshold);
    let report = detector.detect(&reference, &observed);

    let rendered = serde_json::to_string_pretty(&report)
        .map_err(|e| Error::Serialization(format!("drift report encoding failed: {e}")))?;
    println!("{rendered}");

    let summary = report.summary();
    log(
        level,
        LogLevel::Normal,
        &format!(
            "{} of {} features drifted, {} skipped",
            summary.drifted_features, summary.total_features, summary.skipped_features
        ),
    );
    Ok(())
}
