//! Crate-wide error types
//!
//! Only structural failures surface here: a malformed schema, an unreadable
//! artifact, an invalid configuration. Cell-level problems (an unparsable
//! numeric value, an unseen category) are absorbed by the feature builder
//! and the drift detector and never become errors.

use crate::schema::SchemaError;

/// Top-level error type for the predecir pipeline
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required column is missing or the schema itself is malformed
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Configuration could not be loaded or failed validation
    #[error("configuration error: {0}")]
    Config(String),

    /// A model or feature-columns artifact could not be read
    #[error("artifact error: {0}")]
    Artifact(String),

    /// Serialization or deserialization failed
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Tabular input data is structurally unusable
    #[error("data error: {0}")]
    Data(String),

    /// The classifier was used inconsistently with its trained shape
    #[error("model error: {0}")]
    Model(String),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_converts() {
        let err: Error = SchemaError::MissingColumn("tenure".to_string()).into();
        assert!(matches!(err, Error::Schema(_)));
        assert!(err.to_string().contains("tenure"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_display_messages() {
        let err = Error::Artifact("models/model.json missing".to_string());
        assert_eq!(
            err.to_string(),
            "artifact error: models/model.json missing"
        );
    }
}
