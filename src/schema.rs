//! Feature schema registry
//!
//! Declares which raw columns are numeric, which are categorical, and which
//! holds the target label. The schema is an explicit, immutable value passed
//! to the feature builder and the drift detector at construction time, so
//! several schemas can coexist in one process (tests, multi-tenant callers).
//!
//! Changing a schema invalidates any previously persisted feature-column
//! list: a model trained under the old schema must be retrained.

use serde::{Deserialize, Serialize};

/// Schema construction and projection failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A column the schema requires is absent from the input table
    #[error("required column '{0}' is missing from input")]
    MissingColumn(String),

    /// A column was declared in more than one feature set
    #[error("column '{0}' appears in more than one feature set")]
    OverlappingColumn(String),
}

/// Immutable declaration of the raw columns a model consumes
///
/// The three sets are disjoint; construction enforces this. Order within
/// each list is preserved and determines the output column order of the
/// feature builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    numeric: Vec<String>,
    categorical: Vec<String>,
    target: String,
}

impl FeatureSchema {
    /// Build a schema from numeric features, categorical features, and the
    /// target column name. Fails if any column appears twice.
    pub fn new(
        numeric: Vec<String>,
        categorical: Vec<String>,
        target: impl Into<String>,
    ) -> Result<Self, SchemaError> {
        let target = target.into();
        let mut seen = std::collections::BTreeSet::new();
        for col in numeric.iter().chain(categorical.iter()).chain(std::iter::once(&target)) {
            if !seen.insert(col.as_str()) {
                return Err(SchemaError::OverlappingColumn(col.clone()));
            }
        }
        Ok(Self { numeric, categorical, target })
    }

    /// The Telco churn schema used by the shipped CLI
    pub fn telco() -> Self {
        Self {
            numeric: vec![
                "tenure".to_string(),
                "monthlycharges".to_string(),
                "totalcharges".to_string(),
            ],
            categorical: vec![
                "contract".to_string(),
                "paymentmethod".to_string(),
                "internetservice".to_string(),
            ],
            target: "churn".to_string(),
        }
    }

    /// Numeric feature columns, in declaration order
    pub fn numeric(&self) -> &[String] {
        &self.numeric
    }

    /// Categorical feature columns, in declaration order
    pub fn categorical(&self) -> &[String] {
        &self.categorical
    }

    /// Target label column
    pub fn target(&self) -> &str {
        &self.target
    }

    /// All input feature columns (numeric then categorical), the set the
    /// builder projects raw tables down to
    pub fn feature_columns(&self) -> impl Iterator<Item = &str> {
        self.numeric.iter().chain(self.categorical.iter()).map(String::as_str)
    }
}
