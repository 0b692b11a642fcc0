//! # predecir
//!
//! Churn-prediction pipeline core: deterministic feature alignment between
//! training and inference, offline training, online prediction, and
//! covariate-drift monitoring.
//!
//! The linchpin invariant lives in [`features`]: the feature columns
//! derived at training time are persisted, and every inference call
//! conforms its output to that exact column list, whatever categories the
//! incoming record does or does not exhibit. [`drift`] watches whether
//! production inputs still look like the training distribution, one
//! Kolmogorov-Smirnov test per numeric feature.
//!
//! # Example
//!
//! ```
//! use predecir::{FeatureBuilder, FeatureSchema, RawFrame, RawValue};
//!
//! let schema = FeatureSchema::telco();
//! let builder = FeatureBuilder::new(schema);
//!
//! let raw = RawFrame::from_columns(vec![
//!     ("tenure".to_string(), vec![RawValue::from(5.0), RawValue::from(40.0)]),
//!     ("monthlycharges".to_string(), vec![RawValue::from(70.5), RawValue::from(20.0)]),
//!     ("totalcharges".to_string(), vec![RawValue::from(350.0), RawValue::from(800.0)]),
//!     ("contract".to_string(), vec![RawValue::from("Month-to-month"), RawValue::from("Two year")]),
//!     ("paymentmethod".to_string(), vec![RawValue::from("Electronic check"), RawValue::from("Mailed check")]),
//!     ("internetservice".to_string(), vec![RawValue::from("Fiber optic"), RawValue::from("DSL")]),
//! ])?;
//!
//! // Training mode derives the column list; inference mode conforms to it.
//! let (features, columns) = builder.fit_transform(&raw)?;
//! let aligned = builder.transform(&raw, &columns)?;
//! assert_eq!(aligned.columns(), columns.names());
//! assert_eq!(features, aligned);
//! # Ok::<(), predecir::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod drift;
pub mod error;
pub mod features;
pub mod frame;
pub mod io;
pub mod model;
pub mod monitor;
pub mod predict;
pub mod schema;
pub mod train;

pub use drift::{DriftDetector, DriftReport, DriftSummary, FeatureDrift};
pub use error::{Error, Result};
pub use features::{FeatureBuilder, FeatureColumns, MissingValuePolicy};
pub use frame::{read_csv, FeatureFrame, RawFrame, RawRecord, RawValue};
pub use predict::Predictor;
pub use schema::{FeatureSchema, SchemaError};
pub use train::{train_from_config, TrainingReport};
