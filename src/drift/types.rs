//! Type definitions for drift reports.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Outcome of comparing one feature's reference and observed samples
///
/// When either sample has no clean numeric data the comparison fields are
/// `None` and `error` explains why; the rest of the report still completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDrift {
    /// KS statistic, absent when the comparison could not run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistic: Option<f64>,
    /// Two-sided p-value, absent when the comparison could not run
    pub p_value: Option<f64>,
    /// Whether the p-value fell below the detector threshold
    pub drift_detected: Option<bool>,
    /// Why the comparison was skipped, if it was
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FeatureDrift {
    /// Entry for a feature whose samples were too dirty or empty to compare
    pub fn insufficient_data() -> Self {
        Self {
            statistic: None,
            p_value: None,
            drift_detected: None,
            error: Some("insufficient data".to_string()),
        }
    }

    /// Entry for a completed comparison
    pub fn compared(statistic: f64, p_value: f64, threshold: f64) -> Self {
        Self {
            statistic: Some(statistic),
            p_value: Some(p_value),
            drift_detected: Some(p_value < threshold),
            error: None,
        }
    }

    /// Whether this feature was flagged as drifted
    pub fn is_drifted(&self) -> bool {
        self.drift_detected == Some(true)
    }

    /// Whether the comparison was skipped
    pub fn is_skipped(&self) -> bool {
        self.error.is_some()
    }
}

/// Per-feature drift comparison results for one detector call
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DriftReport {
    /// One entry per numeric feature in the schema
    pub features: BTreeMap<String, FeatureDrift>,
}

impl DriftReport {
    /// Result for one feature, if the schema contains it
    pub fn feature(&self, name: &str) -> Option<&FeatureDrift> {
        self.features.get(name)
    }

    /// Whether any feature was flagged as drifted
    pub fn has_drift(&self) -> bool {
        self.features.values().any(FeatureDrift::is_drifted)
    }

    /// Aggregate counts over the report
    pub fn summary(&self) -> DriftSummary {
        DriftSummary {
            total_features: self.features.len(),
            drifted_features: self.features.values().filter(|f| f.is_drifted()).count(),
            skipped_features: self.features.values().filter(|f| f.is_skipped()).count(),
        }
    }
}

/// Aggregate view of a drift report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftSummary {
    /// Features the schema asked to compare
    pub total_features: usize,
    /// Features flagged as drifted
    pub drifted_features: usize,
    /// Features skipped for lack of clean data
    pub skipped_features: usize,
}

impl DriftSummary {
    /// Whether any feature drifted
    pub fn has_drift(&self) -> bool {
        self.drifted_features > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_entry() {
        let entry = FeatureDrift::insufficient_data();
        assert!(entry.is_skipped());
        assert!(!entry.is_drifted());
        assert_eq!(entry.p_value, None);
        assert_eq!(entry.error.as_deref(), Some("insufficient data"));
    }

    #[test]
    fn test_compared_entry_applies_threshold() {
        let drifted = FeatureDrift::compared(0.8, 0.01, 0.05);
        assert!(drifted.is_drifted());
        let steady = FeatureDrift::compared(0.1, 0.9, 0.05);
        assert!(!steady.is_drifted());
        assert_eq!(steady.drift_detected, Some(false));
    }

    #[test]
    fn test_summary_counts() {
        let mut report = DriftReport::default();
        report
            .features
            .insert("tenure".to_string(), FeatureDrift::compared(0.8, 0.01, 0.05));
        report
            .features
            .insert("monthlycharges".to_string(), FeatureDrift::insufficient_data());

        let summary = report.summary();
        assert_eq!(summary.total_features, 2);
        assert_eq!(summary.drifted_features, 1);
        assert_eq!(summary.skipped_features, 1);
        assert!(summary.has_drift());
        assert!(report.has_drift());
    }

    #[test]
    fn test_skipped_entry_omits_error_free_fields_in_json() {
        let entry = FeatureDrift::compared(0.4, 0.2, 0.05);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("error"));
        let entry = FeatureDrift::insufficient_data();
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("insufficient data"));
        assert!(!json.contains("statistic"));
    }
}
