//! Two-phase feature builder
//!
//! Training mode (`fit_transform`) derives the output column list from the
//! data; inference mode (`transform`) conforms its output to a previously
//! derived list, padding categories the record does not exhibit and dropping
//! categories training never saw. The conform step is what guarantees the
//! classifier always sees the column list it was fitted with.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::frame::{FeatureFrame, RawFrame};
use crate::schema::{FeatureSchema, SchemaError};

/// How missing cells are filled before encoding
///
/// A named policy rather than inline constants, so an alternative fill
/// strategy can be introduced without touching the transform itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValuePolicy {
    /// Missing numerics become `0.0`; missing categoricals become the
    /// literal category `"unknown"`
    #[default]
    ZeroAndUnknown,
}

impl MissingValuePolicy {
    fn numeric_fill(self) -> f64 {
        match self {
            MissingValuePolicy::ZeroAndUnknown => 0.0,
        }
    }

    fn categorical_fill(self) -> &'static str {
        match self {
            MissingValuePolicy::ZeroAndUnknown => "unknown",
        }
    }
}

/// The ordered output-column list fixed at training time
///
/// Persisted next to the model artifact and handed back to
/// [`FeatureBuilder::transform`] at inference time. Inference output always
/// has exactly these columns, in this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureColumns {
    columns: Vec<String>,
}

impl FeatureColumns {
    /// Wrap an ordered column list
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Column names, in order
    pub fn names(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Whether a column is part of the list
    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

/// Deterministic raw-to-numeric feature transform
#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    schema: FeatureSchema,
    policy: MissingValuePolicy,
}

impl FeatureBuilder {
    /// Create a builder over the given schema with the default missing-value
    /// policy
    pub fn new(schema: FeatureSchema) -> Self {
        Self { schema, policy: MissingValuePolicy::default() }
    }

    /// Override the missing-value policy
    pub fn with_policy(mut self, policy: MissingValuePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The schema this builder projects onto
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Training mode: build features and derive the output column list.
    ///
    /// The alphabetically first category of each categorical column is
    /// dropped as the reference level here, and only here: the returned
    /// [`FeatureColumns`] is the contract later inference calls must conform
    /// to; persist it alongside the trained model.
    pub fn fit_transform(&self, raw: &RawFrame) -> Result<(FeatureFrame, FeatureColumns)> {
        let frame = self.build(raw, true)?;
        let columns = FeatureColumns::new(frame.columns().to_vec());
        Ok((frame, columns))
    }

    /// Inference mode: build features, then conform them to `expected`.
    ///
    /// Indicator columns are built for every category the input exhibits;
    /// `expected` decides what survives. Columns in `expected` the input
    /// does not produce are padded with `0.0`. Produced columns `expected`
    /// lacks (the training-time reference category and categories unseen at
    /// training time alike) are dropped, which makes an unseen category
    /// indistinguishable from the reference category. The output column list
    /// equals `expected` exactly, in order, for every input.
    pub fn transform(&self, raw: &RawFrame, expected: &FeatureColumns) -> Result<FeatureFrame> {
        let built = self.build(raw, false)?;
        Ok(conform(&built, expected))
    }

    /// Shared projection + coercion + imputation + encoding pipeline.
    ///
    /// Output column order: numeric features in schema order, then one
    /// indicator column per (categorical feature, category) pair with
    /// categories in alphabetical order. With `drop_reference`, the
    /// alphabetically first category of each column is omitted.
    fn build(&self, raw: &RawFrame, drop_reference: bool) -> Result<FeatureFrame> {
        let n_rows = raw.n_rows();
        let mut columns = Vec::new();
        let mut data: Vec<Vec<f64>> = Vec::new();

        for name in self.schema.numeric() {
            let cells = raw
                .column(name)
                .ok_or_else(|| SchemaError::MissingColumn(name.clone()))?;
            let values = cells
                .iter()
                .map(|cell| cell.as_numeric().unwrap_or_else(|| self.policy.numeric_fill()))
                .collect();
            columns.push(name.clone());
            data.push(values);
        }

        for name in self.schema.categorical() {
            let cells = raw
                .column(name)
                .ok_or_else(|| SchemaError::MissingColumn(name.clone()))?;
            let categories: Vec<String> = cells
                .iter()
                .map(|cell| {
                    cell.as_category()
                        .unwrap_or_else(|| self.policy.categorical_fill().to_string())
                })
                .collect();

            // Alphabetical order fixes both the indicator column order and
            // the choice of reference level, independent of row order.
            let distinct: BTreeSet<&String> = categories.iter().collect();
            for category in distinct.into_iter().skip(usize::from(drop_reference)) {
                columns.push(format!("{name}_{category}"));
                data.push(
                    categories
                        .iter()
                        .map(|c| if c == category { 1.0 } else { 0.0 })
                        .collect(),
                );
            }
        }

        Ok(FeatureFrame::from_column_data(columns, data, n_rows))
    }
}

/// Reshape a built frame onto the expected column list: pad absent columns
/// with zeros, drop unexpected ones, reorder to match.
fn conform(built: &FeatureFrame, expected: &FeatureColumns) -> FeatureFrame {
    let index: HashMap<&str, usize> = built
        .columns()
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let rows = built
        .rows()
        .iter()
        .map(|row| {
            expected
                .names()
                .iter()
                .map(|name| index.get(name.as_str()).map_or(0.0, |&i| row[i]))
                .collect()
        })
        .collect();

    FeatureFrame::new(expected.names().to_vec(), rows)
}
