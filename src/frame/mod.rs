//! Tabular data containers
//!
//! `RawFrame` holds untyped input cells column-wise, the shape data arrives
//! in from a CSV source, a prediction log, or a single inference payload.
//! `FeatureFrame` holds the numeric output of the feature builder row-wise,
//! the shape the classifier consumes.

mod csv;

pub use csv::read_csv;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};

/// A single raw record, as decoded from a JSON inference payload
pub type RawRecord = BTreeMap<String, RawValue>;

/// One raw input cell: text, a number, or missing
///
/// Deserializes from plain JSON scalars, so `{"tenure": 5, "contract":
/// "Month-to-month"}` maps directly onto raw cells; `null` becomes
/// [`RawValue::Missing`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// A numeric scalar
    Number(f64),
    /// A text scalar
    Text(String),
    /// No value
    Missing,
}

impl RawValue {
    /// Lenient numeric view of the cell.
    ///
    /// Text is trimmed and parsed as a float; blank or unparsable text and
    /// non-finite numbers yield `None`. This is the coercion policy shared
    /// by the feature builder and the drift detector: a dirty cell never
    /// blocks the pipeline.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) if n.is_finite() => Some(*n),
            RawValue::Number(_) => None,
            RawValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
            }
            RawValue::Missing => None,
        }
    }

    /// Categorical view of the cell. Blank text counts as missing; numbers
    /// are rendered as their display form.
    pub fn as_category(&self) -> Option<String> {
        match self {
            RawValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            RawValue::Number(n) => Some(format!("{n}")),
            RawValue::Missing => None,
        }
    }

    /// Whether the cell carries no usable value at all
    pub fn is_missing(&self) -> bool {
        matches!(self, RawValue::Missing)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Number(v)
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Number(v as f64)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Text(v)
    }
}

/// Column-major table of raw cells
///
/// Columns keep their declaration order; all columns have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFrame {
    columns: Vec<String>,
    cells: Vec<Vec<RawValue>>,
    n_rows: usize,
}

impl RawFrame {
    /// Build a frame from named columns. All columns must be equally long.
    pub fn from_columns(columns: Vec<(String, Vec<RawValue>)>) -> Result<Self> {
        let n_rows = columns.first().map_or(0, |(_, cells)| cells.len());
        for (name, cells) in &columns {
            if cells.len() != n_rows {
                return Err(Error::Data(format!(
                    "column '{name}' has {} cells, expected {n_rows}",
                    cells.len()
                )));
            }
        }
        let (columns, cells) = columns.into_iter().unzip();
        Ok(Self { columns, cells, n_rows })
    }

    /// Build a frame from a sequence of records. The column set is the union
    /// of all record keys; a record without a key contributes a missing cell.
    pub fn from_records(records: &[RawRecord]) -> Self {
        let names: BTreeSet<&String> = records.iter().flat_map(|r| r.keys()).collect();
        let columns: Vec<String> = names.into_iter().cloned().collect();
        let cells = columns
            .iter()
            .map(|name| {
                records
                    .iter()
                    .map(|r| r.get(name).cloned().unwrap_or(RawValue::Missing))
                    .collect()
            })
            .collect();
        Self { n_rows: records.len(), columns, cells }
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Whether the frame has no rows
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Column names, in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Cells of one column, if present
    pub fn column(&self, name: &str) -> Option<&[RawValue]> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|i| self.cells[i].as_slice())
    }

    /// Whether a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

/// Row-major numeric table, the feature builder's output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureFrame {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureFrame {
    /// Build a frame from row-major data. Each row must match the column
    /// count; callers inside this crate guarantee that by construction.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    /// Build a frame by transposing column-major data
    pub(crate) fn from_column_data(
        columns: Vec<String>,
        data: Vec<Vec<f64>>,
        n_rows: usize,
    ) -> Self {
        let rows = (0..n_rows)
            .map(|r| data.iter().map(|col| col[r]).collect())
            .collect();
        Self { columns, rows }
    }

    /// Column names, in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row-major data
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Values of one column, if present
    pub fn column_values(&self, name: &str) -> Option<Vec<f64>> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|i| self.rows.iter().map(|r| r[i]).collect())
    }
}
