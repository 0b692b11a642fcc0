//! Artifact persistence
//!
//! Two artifacts leave training: the fitted model state and the ordered
//! feature-column list. Both are pretty-printed JSON. Serving loads them
//! once at startup; a missing or corrupt artifact must stop the process
//! before it can predict with unaligned features.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::features::FeatureColumns;

/// Descriptive metadata stored with a trained model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name/identifier
    pub name: String,
    /// Model family (e.g. "logistic_regression")
    pub architecture: String,
    /// Version of the crate that produced the artifact
    pub version: String,
    /// When training finished
    pub trained_at: DateTime<Utc>,
}

impl ModelMetadata {
    /// Metadata stamped with the current crate version and time
    pub fn new(name: impl Into<String>, architecture: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            architecture: architecture.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            trained_at: Utc::now(),
        }
    }
}

/// Serializable state of a fitted model
///
/// `feature_names` records the training-time feature columns in classifier
/// input order; serving falls back to it when no separate feature-columns
/// artifact is available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelState {
    /// Model metadata
    pub metadata: ModelMetadata,
    /// Training-time feature columns, in input order
    pub feature_names: Vec<String>,
    /// Fitted weights, one per feature column
    pub weights: Vec<f64>,
    /// Fitted intercept
    pub bias: f64,
}

/// Save a model state as pretty JSON
pub fn save_model(state: &ModelState, path: impl AsRef<Path>) -> Result<()> {
    let data = serde_json::to_string_pretty(state)
        .map_err(|e| Error::Serialization(format!("model serialization failed: {e}")))?;
    fs::write(path.as_ref(), data)?;
    Ok(())
}

/// Load a model state, failing loudly if the artifact is missing or corrupt
pub fn load_model(path: impl AsRef<Path>) -> Result<ModelState> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Artifact(format!("cannot read model artifact {}: {e}", path.display())))?;
    serde_json::from_str(&content)
        .map_err(|e| Error::Serialization(format!("cannot parse model artifact {}: {e}", path.display())))
}

/// Save the feature-columns artifact as pretty JSON
pub fn save_feature_columns(columns: &FeatureColumns, path: impl AsRef<Path>) -> Result<()> {
    let data = serde_json::to_string_pretty(columns)
        .map_err(|e| Error::Serialization(format!("feature columns serialization failed: {e}")))?;
    fs::write(path.as_ref(), data)?;
    Ok(())
}

/// Load the feature-columns artifact
pub fn load_feature_columns(path: impl AsRef<Path>) -> Result<FeatureColumns> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::Artifact(format!("cannot read feature columns artifact {}: {e}", path.display()))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Serialization(format!(
            "cannot parse feature columns artifact {}: {e}",
            path.display()
        ))
    })
}
