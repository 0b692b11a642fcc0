//! Online prediction
//!
//! [`Predictor`] loads the model and feature-column artifacts once at
//! startup and then serves independent, idempotent `predict` calls. All
//! loaded state is immutable, so one predictor can be shared freely across
//! concurrent callers.

use std::path::Path;

use crate::error::{Error, Result};
use crate::features::{FeatureBuilder, FeatureColumns};
use crate::frame::{RawFrame, RawRecord};
use crate::io::{load_feature_columns, load_model};
use crate::model::{Classifier, LogisticRegression};
use crate::schema::FeatureSchema;

/// One-record churn probability server
#[derive(Debug, Clone)]
pub struct Predictor {
    model: LogisticRegression,
    builder: FeatureBuilder,
    expected: Option<FeatureColumns>,
}

impl Predictor {
    /// Load serving state from artifacts.
    ///
    /// The expected feature columns are resolved in order of preference:
    /// the feature-columns artifact if it exists, else the column list
    /// recorded inside the model artifact, else none. With none resolved
    /// the predictor runs degraded: each record's columns are derived ad
    /// hoc and alignment with the trained model is no longer guaranteed.
    ///
    /// A model artifact that is missing or unreadable is fatal: serving
    /// must not start if its features could be misaligned.
    pub fn from_artifacts(
        model_path: impl AsRef<Path>,
        columns_path: Option<&Path>,
        schema: FeatureSchema,
    ) -> Result<Self> {
        let state = load_model(model_path)?;

        let expected = match columns_path {
            Some(path) if path.exists() => Some(load_feature_columns(path)?),
            _ if !state.feature_names.is_empty() => {
                Some(FeatureColumns::new(state.feature_names.clone()))
            }
            _ => None,
        };

        let model = LogisticRegression::from_parameters(state.weights, state.bias);
        Ok(Self::new(model, expected, schema))
    }

    /// Assemble a predictor from in-memory parts
    pub fn new(
        model: LogisticRegression,
        expected: Option<FeatureColumns>,
        schema: FeatureSchema,
    ) -> Self {
        Self { model, builder: FeatureBuilder::new(schema), expected }
    }

    /// The feature columns inference conforms to, if any were resolved
    pub fn expected_columns(&self) -> Option<&FeatureColumns> {
        self.expected.as_ref()
    }

    /// Churn probability for one raw record
    pub fn predict(&self, record: &RawRecord) -> Result<f64> {
        let frame = RawFrame::from_records(std::slice::from_ref(record));

        let features = match &self.expected {
            Some(columns) => self.builder.transform(&frame, columns)?,
            None => self.builder.fit_transform(&frame)?.0,
        };

        let probabilities = self.model.predict_proba(&features)?;
        probabilities
            .first()
            .copied()
            .ok_or_else(|| Error::Model("classifier returned no prediction".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::RawValue;
    use crate::io::{save_feature_columns, save_model, ModelMetadata, ModelState};
    use tempfile::tempdir;

    fn schema() -> FeatureSchema {
        FeatureSchema::new(
            vec!["tenure".to_string()],
            vec!["contract".to_string()],
            "churn",
        )
        .unwrap()
    }

    fn columns() -> FeatureColumns {
        FeatureColumns::new(vec!["tenure".to_string(), "contract_Two year".to_string()])
    }

    fn record(tenure: f64, contract: &str) -> RawRecord {
        let mut record = RawRecord::new();
        record.insert("tenure".to_string(), RawValue::from(tenure));
        record.insert("contract".to_string(), RawValue::from(contract));
        record
    }

    #[test]
    fn test_predict_returns_probability() {
        let model = LogisticRegression::from_parameters(vec![-0.1, 1.0], 0.2);
        let predictor = Predictor::new(model, Some(columns()), schema());

        let p = predictor.predict(&record(5.0, "Two year")).unwrap();
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn test_predict_is_idempotent() {
        let model = LogisticRegression::from_parameters(vec![-0.1, 1.0], 0.2);
        let predictor = Predictor::new(model, Some(columns()), schema());

        let input = record(12.0, "Month-to-month");
        assert_eq!(
            predictor.predict(&input).unwrap(),
            predictor.predict(&input).unwrap()
        );
    }

    #[test]
    fn test_unseen_category_matches_reference_encoding() {
        let model = LogisticRegression::from_parameters(vec![-0.1, 1.0], 0.2);
        let predictor = Predictor::new(model, Some(columns()), schema());

        let unseen = predictor.predict(&record(5.0, "Quantum plan")).unwrap();
        let reference = predictor.predict(&record(5.0, "Month-to-month")).unwrap();
        assert_eq!(unseen, reference);
    }

    #[test]
    fn test_from_artifacts_prefers_columns_file() {
        let dir = tempdir().unwrap();
        let model_path = dir.path().join("model.json");
        let columns_path = dir.path().join("feature_columns.json");

        let state = ModelState {
            metadata: ModelMetadata::new("churn-model", "logistic_regression"),
            feature_names: vec!["tenure".to_string()],
            weights: vec![-0.1, 1.0],
            bias: 0.0,
        };
        save_model(&state, &model_path).unwrap();
        save_feature_columns(&columns(), &columns_path).unwrap();

        let predictor =
            Predictor::from_artifacts(&model_path, Some(&columns_path), schema()).unwrap();
        assert_eq!(predictor.expected_columns(), Some(&columns()));
    }

    #[test]
    fn test_from_artifacts_falls_back_to_model_feature_names() {
        let dir = tempdir().unwrap();
        let model_path = dir.path().join("model.json");

        let state = ModelState {
            metadata: ModelMetadata::new("churn-model", "logistic_regression"),
            feature_names: vec!["tenure".to_string(), "contract_Two year".to_string()],
            weights: vec![-0.1, 1.0],
            bias: 0.0,
        };
        save_model(&state, &model_path).unwrap();

        let missing = dir.path().join("not_written.json");
        let predictor =
            Predictor::from_artifacts(&model_path, Some(&missing), schema()).unwrap();
        assert_eq!(predictor.expected_columns(), Some(&columns()));
    }

    #[test]
    fn test_missing_model_artifact_is_fatal() {
        let err =
            Predictor::from_artifacts("/no/model.json", None, schema()).unwrap_err();
        assert!(matches!(err, Error::Artifact(_)));
    }
}
