//! Drift detector implementation.

use std::collections::BTreeMap;

use super::statistical::ks_two_sample;
use super::types::{DriftReport, FeatureDrift};
use crate::frame::{RawFrame, RawValue};
use crate::schema::FeatureSchema;

/// Per-feature two-sample drift detector
///
/// Inputs need not have passed through the feature builder: both columns are
/// independently coerced with the same lenient parse, and rows that do not
/// parse are dropped so the comparison runs on clean samples only.
#[derive(Debug, Clone)]
pub struct DriftDetector {
    schema: FeatureSchema,
    threshold: f64,
}

impl DriftDetector {
    /// Create a detector over the schema's numeric features with the default
    /// significance threshold of `0.05`
    pub fn new(schema: FeatureSchema) -> Self {
        Self { schema, threshold: 0.05 }
    }

    /// Override the significance threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// The significance threshold in use
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Compare the observed table against the reference table.
    ///
    /// A feature whose cleaned sample is empty on either side (including a
    /// column absent from one of the frames) reports `insufficient data`
    /// instead of failing; the report always covers every numeric feature.
    pub fn detect(&self, reference: &RawFrame, observed: &RawFrame) -> DriftReport {
        let mut features = BTreeMap::new();

        for name in self.schema.numeric() {
            let reference_sample = clean_column(reference, name);
            let observed_sample = clean_column(observed, name);

            let entry = if reference_sample.is_empty() || observed_sample.is_empty() {
                FeatureDrift::insufficient_data()
            } else {
                let (statistic, p_value) = ks_two_sample(&reference_sample, &observed_sample);
                FeatureDrift::compared(statistic, p_value, self.threshold)
            };
            features.insert(name.clone(), entry);
        }

        DriftReport { features }
    }
}

/// Numeric sample of one column with unparsable and missing cells dropped
fn clean_column(frame: &RawFrame, name: &str) -> Vec<f64> {
    frame
        .column(name)
        .map(|cells| cells.iter().filter_map(RawValue::as_numeric).collect())
        .unwrap_or_default()
}
