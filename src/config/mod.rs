//! Declarative training configuration
//!
//! Training is driven by a YAML spec: where the data lives, how to split
//! it, and which classifier hyperparameters to use. The spec is parsed with
//! serde, validated before anything runs, and turned into a classifier by
//! [`build_classifier`].
//!
//! ```yaml
//! data:
//!   input_path: data/processed/train.csv
//!   target: churn
//! training:
//!   test_size: 0.2
//!   random_state: 42
//! model:
//!   type: logistic_regression
//!   params:
//!     learning_rate: 0.05
//!     epochs: 300
//! output:
//!   model_path: models/model.json
//!   columns_path: models/feature_columns.json
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::LogisticRegression;

// Classifier hyperparameter field names
const PARAM_LEARNING_RATE: &str = "learning_rate";
const PARAM_EPOCHS: &str = "epochs";
const PARAM_L2: &str = "l2";

const DEFAULT_LEARNING_RATE: f64 = 0.1;
const DEFAULT_EPOCHS: usize = 200;

/// Complete training specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainSpec {
    /// Input data configuration
    pub data: DataConfig,

    /// Split and seed parameters
    #[serde(default)]
    pub training: TrainingParams,

    /// Classifier configuration
    #[serde(default)]
    pub model: ModelConfig,

    /// Artifact destinations
    #[serde(default)]
    pub output: OutputConfig,
}

/// Input data configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Training CSV path
    pub input_path: PathBuf,

    /// Target column name; defaults to the schema's target when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// Train/test split parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingParams {
    /// Fraction of rows held out for evaluation
    #[serde(default = "default_test_size")]
    pub test_size: f64,

    /// Seed for the split shuffle
    #[serde(default = "default_random_state")]
    pub random_state: u64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self { test_size: default_test_size(), random_state: default_random_state() }
    }
}

fn default_test_size() -> f64 {
    0.2
}

fn default_random_state() -> u64 {
    42
}

/// Classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Classifier family
    #[serde(rename = "type", default = "default_model_type")]
    pub kind: String,

    /// Free-form hyperparameters for the chosen family
    #[serde(default)]
    pub params: HashMap<String, serde_json::Value>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self { kind: default_model_type(), params: HashMap::new() }
    }
}

fn default_model_type() -> String {
    "logistic_regression".to_string()
}

/// Artifact destinations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where the model artifact is written
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Where the feature-columns artifact is written
    #[serde(default = "default_columns_path")]
    pub columns_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { model_path: default_model_path(), columns_path: default_columns_path() }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models/model.json")
}

fn default_columns_path() -> PathBuf {
    PathBuf::from("models/feature_columns.json")
}

/// Validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Training data path does not exist: {0}")]
    TrainDataNotFound(String),

    #[error("Invalid test size: {0} (must be > 0.0 and < 1.0)")]
    InvalidTestSize(f64),

    #[error("Invalid learning rate: {0} (must be > 0.0 and <= 1.0)")]
    InvalidLearningRate(f64),

    #[error("Invalid epochs: {0} (must be > 0)")]
    InvalidEpochs(usize),

    #[error("Invalid L2 penalty: {0} (must be >= 0.0)")]
    InvalidL2(f64),

    #[error("Invalid model type: {0} (must be: logistic_regression)")]
    InvalidModelType(String),
}

/// Load a training spec from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> Result<TrainSpec> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read config file {}: {e}", path.display())))?;
    serde_yaml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse YAML config: {e}")))
}

/// Validate a training spec before running it
pub fn validate_config(spec: &TrainSpec) -> std::result::Result<(), ValidationError> {
    if !spec.data.input_path.exists() {
        return Err(ValidationError::TrainDataNotFound(
            spec.data.input_path.display().to_string(),
        ));
    }

    if spec.training.test_size <= 0.0 || spec.training.test_size >= 1.0 {
        return Err(ValidationError::InvalidTestSize(spec.training.test_size));
    }

    if spec.model.kind != "logistic_regression" {
        return Err(ValidationError::InvalidModelType(spec.model.kind.clone()));
    }

    let lr = learning_rate(spec);
    if lr <= 0.0 || lr > 1.0 {
        return Err(ValidationError::InvalidLearningRate(lr));
    }

    let epochs = epochs(spec);
    if epochs == 0 {
        return Err(ValidationError::InvalidEpochs(epochs));
    }

    let l2 = l2_penalty(spec);
    if l2 < 0.0 {
        return Err(ValidationError::InvalidL2(l2));
    }

    Ok(())
}

/// Build the configured classifier from a spec
pub fn build_classifier(spec: &TrainSpec) -> Result<LogisticRegression> {
    match spec.model.kind.as_str() {
        "logistic_regression" => {
            Ok(LogisticRegression::new(learning_rate(spec), epochs(spec)).with_l2(l2_penalty(spec)))
        }
        kind => Err(Error::Config(format!(
            "Unknown model type: {kind}. Supported: logistic_regression"
        ))),
    }
}

fn learning_rate(spec: &TrainSpec) -> f64 {
    spec.model
        .params
        .get(PARAM_LEARNING_RATE)
        .and_then(serde_json::Value::as_f64)
        .unwrap_or(DEFAULT_LEARNING_RATE)
}

fn epochs(spec: &TrainSpec) -> usize {
    spec.model
        .params
        .get(PARAM_EPOCHS)
        .and_then(serde_json::Value::as_u64)
        .map_or(DEFAULT_EPOCHS, |v| v as usize)
}

fn l2_penalty(spec: &TrainSpec) -> f64 {
    spec.model.params.get(PARAM_L2).and_then(serde_json::Value::as_f64).unwrap_or(0.0)
}
