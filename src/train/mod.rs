//! Offline training pipeline
//!
//! Loads a CSV, normalizes the target label, derives the feature schema from
//! the data, fits the configured classifier on a seeded train/test split,
//! and writes the two serving artifacts: the model state and the
//! feature-column list.

pub mod metrics;

use std::fs;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::{build_classifier, load_config, validate_config, TrainSpec};
use crate::error::{Error, Result};
use crate::features::{FeatureBuilder, FeatureColumns};
use crate::frame::{read_csv, FeatureFrame, RawValue};
use crate::io::{save_feature_columns, save_model, ModelMetadata, ModelState};
use crate::model::Classifier;
use crate::schema::{FeatureSchema, SchemaError};

/// Outcome of a training run
#[derive(Debug, Clone)]
pub struct TrainingReport {
    /// Held-out accuracy at threshold 0.5
    pub accuracy: f64,
    /// Rows used for fitting
    pub train_rows: usize,
    /// Rows held out for evaluation
    pub test_rows: usize,
    /// The derived feature columns, as persisted
    pub feature_columns: FeatureColumns,
    /// Where the model artifact was written
    pub model_path: PathBuf,
    /// Where the feature-columns artifact was written
    pub columns_path: PathBuf,
}

/// Train from a YAML config file: load, validate, run
pub fn train_from_config(
    path: impl AsRef<std::path::Path>,
    schema: &FeatureSchema,
) -> Result<TrainingReport> {
    let spec = load_config(path)?;
    validate_config(&spec).map_err(|e| Error::Config(format!("invalid config: {e}")))?;
    train_from_spec(&spec, schema)
}

/// Train from an already validated spec
pub fn train_from_spec(spec: &TrainSpec, schema: &FeatureSchema) -> Result<TrainingReport> {
    let raw = read_csv(&spec.data.input_path)?;

    let target_name = spec.data.target.clone().unwrap_or_else(|| schema.target().to_string());
    let target_cells = raw
        .column(&target_name)
        .ok_or_else(|| SchemaError::MissingColumn(target_name.clone()))?;
    let targets = target_cells
        .iter()
        .enumerate()
        .map(|(row, cell)| parse_label(cell, row))
        .collect::<Result<Vec<f64>>>()?;

    let builder = FeatureBuilder::new(schema.clone());
    let (features, columns) = builder.fit_transform(&raw)?;

    let (train_idx, test_idx) =
        split_indices(features.n_rows(), spec.training.test_size, spec.training.random_state)?;
    let x_train = select_rows(&features, &train_idx);
    let y_train = select_values(&targets, &train_idx);
    let x_test = select_rows(&features, &test_idx);
    let y_test = select_values(&targets, &test_idx);

    let mut model = build_classifier(spec)?;
    model.fit(&x_train, &y_train)?;

    let probabilities = model.predict_proba(&x_test)?;
    let accuracy = metrics::accuracy(&probabilities, &y_test, 0.5);

    let state = ModelState {
        metadata: ModelMetadata::new("churn-model", spec.model.kind.clone()),
        feature_names: columns.names().to_vec(),
        weights: model.weights().to_vec(),
        bias: model.bias(),
    };
    ensure_parent_dir(&spec.output.model_path)?;
    ensure_parent_dir(&spec.output.columns_path)?;
    save_model(&state, &spec.output.model_path)?;
    save_feature_columns(&columns, &spec.output.columns_path)?;

    Ok(TrainingReport {
        accuracy,
        train_rows: train_idx.len(),
        test_rows: test_idx.len(),
        feature_columns: columns,
        model_path: spec.output.model_path.clone(),
        columns_path: spec.output.columns_path.clone(),
    })
}

/// Interpret a raw target cell as a binary label
fn parse_label(cell: &RawValue, row: usize) -> Result<f64> {
    match cell {
        RawValue::Text(s) => match s.trim().to_lowercase().as_str() {
            "yes" | "true" | "1" | "1.0" => Ok(1.0),
            "no" | "false" | "0" | "0.0" => Ok(0.0),
            other => Err(Error::Data(format!(
                "row {row}: cannot interpret target value '{other}' as a binary label"
            ))),
        },
        RawValue::Number(n) if *n == 0.0 || *n == 1.0 => Ok(*n),
        RawValue::Number(n) => {
            Err(Error::Data(format!("row {row}: target value {n} is not binary")))
        }
        RawValue::Missing => Err(Error::Data(format!("row {row}: target value is missing"))),
    }
}

/// Seeded shuffle split: returns `(train_indices, test_indices)`
fn split_indices(n_rows: usize, test_size: f64, seed: u64) -> Result<(Vec<usize>, Vec<usize>)> {
    if n_rows < 2 {
        return Err(Error::Data(format!("need at least 2 rows to split, got {n_rows}")));
    }

    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n_rows as f64) * test_size).round() as usize;
    let n_test = n_test.clamp(1, n_rows - 1);
    let test = indices[..n_test].to_vec();
    let train = indices[n_test..].to_vec();
    Ok((train, test))
}

fn select_rows(frame: &FeatureFrame, indices: &[usize]) -> FeatureFrame {
    let rows = indices.iter().map(|&i| frame.rows()[i].clone()).collect();
    FeatureFrame::new(frame.columns().to_vec(), rows)
}

fn select_values(values: &[f64], indices: &[usize]) -> Vec<f64> {
    indices.iter().map(|&i| values[i]).collect()
}

fn ensure_parent_dir(path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
