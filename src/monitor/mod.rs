//! Prediction logging
//!
//! Serving appends every `(input, probability)` pair to a JSONL log; the
//! drift checker later replays the logged inputs as the observed table.
//! One line per prediction keeps the log append-only and cheap to scan.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::frame::{RawFrame, RawRecord};

/// One logged prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// When the prediction was served
    pub timestamp: DateTime<Utc>,
    /// The raw inference payload
    pub input: RawRecord,
    /// The returned churn probability
    pub prediction: f64,
}

/// Append-only JSONL log of served predictions
#[derive(Debug, Clone)]
pub struct PredictionLog {
    path: PathBuf,
}

impl PredictionLog {
    /// Use the log at `path`; nothing is opened until the first append or
    /// read
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one prediction, creating the parent directory and file on
    /// first use
    pub fn append(&self, input: &RawRecord, prediction: f64) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let record =
            PredictionRecord { timestamp: Utc::now(), input: input.clone(), prediction };
        let line = serde_json::to_string(&record)
            .map_err(|e| Error::Serialization(format!("prediction record encoding failed: {e}")))?;

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    /// Read every logged record back
    pub fn read_records(&self) -> Result<Vec<PredictionRecord>> {
        let file = fs::File::open(&self.path).map_err(|e| {
            Error::Data(format!("cannot open prediction log {}: {e}", self.path.display()))
        })?;

        let mut records = Vec::new();
        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: PredictionRecord = serde_json::from_str(&line).map_err(|e| {
                Error::Data(format!(
                    "bad record on line {} of {}: {e}",
                    line_no + 1,
                    self.path.display()
                ))
            })?;
            records.push(record);
        }
        Ok(records)
    }

    /// Reconstruct the logged inputs as a raw frame, the observed table for
    /// a drift check
    pub fn read_inputs(&self) -> Result<RawFrame> {
        let records = self.read_records()?;
        let inputs: Vec<RawRecord> = records.into_iter().map(|r| r.input).collect();
        Ok(RawFrame::from_records(&inputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::RawValue;
    use tempfile::tempdir;

    fn record(tenure: f64, contract: &str) -> RawRecord {
        let mut record = RawRecord::new();
        record.insert("tenure".to_string(), RawValue::from(tenure));
        record.insert("contract".to_string(), RawValue::from(contract));
        record
    }

    #[test]
    fn test_append_and_read_round_trip() {
        let dir = tempdir().unwrap();
        let log = PredictionLog::new(dir.path().join("predictions.log"));

        log.append(&record(5.0, "Month-to-month"), 0.82).unwrap();
        log.append(&record(40.0, "Two year"), 0.07).unwrap();

        let records = log.read_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].prediction, 0.82);
        assert_eq!(records[1].input, record(40.0, "Two year"));
    }

    #[test]
    fn test_read_inputs_builds_a_frame() {
        let dir = tempdir().unwrap();
        let log = PredictionLog::new(dir.path().join("predictions.log"));
        log.append(&record(5.0, "Month-to-month"), 0.5).unwrap();
        log.append(&record(12.0, "One year"), 0.5).unwrap();

        let frame = log.read_inputs().unwrap();
        assert_eq!(frame.n_rows(), 2);
        assert_eq!(
            frame.column("tenure").unwrap(),
            [RawValue::Number(5.0), RawValue::Number(12.0)]
        );
    }

    #[test]
    fn test_append_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let log = PredictionLog::new(dir.path().join("monitoring/predictions.log"));
        log.append(&record(1.0, "One year"), 0.3).unwrap();
        assert!(log.path().exists());
    }

    #[test]
    fn test_missing_log_is_an_error() {
        let log = PredictionLog::new("/no/such/predictions.log");
        assert!(log.read_records().is_err());
    }
}
