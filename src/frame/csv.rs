//! CSV ingestion
//!
//! Reads a headed CSV file into a [`RawFrame`]. Header names are trimmed and
//! lowercased so files exported with mixed-case headers still line up with
//! the schema. Cells stay text; numeric coercion happens downstream.

use std::path::Path;

use super::{RawFrame, RawValue};
use crate::error::{Error, Result};

/// Read a CSV file into a raw frame.
///
/// Empty cells become [`RawValue::Missing`]; everything else is kept as
/// text. Ragged rows are a hard error.
pub fn read_csv(path: impl AsRef<Path>) -> Result<RawFrame> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| Error::Data(format!("cannot open {}: {e}", path.display())))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| Error::Data(format!("cannot read headers of {}: {e}", path.display())))?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut cells: Vec<Vec<RawValue>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record =
            record.map_err(|e| Error::Data(format!("bad row in {}: {e}", path.display())))?;
        for (i, field) in record.iter().enumerate() {
            let cell = if field.trim().is_empty() {
                RawValue::Missing
            } else {
                RawValue::Text(field.to_string())
            };
            cells[i].push(cell);
        }
    }

    RawFrame::from_columns(headers.into_iter().zip(cells).collect())
}
