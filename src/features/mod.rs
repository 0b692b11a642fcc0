//! Feature building
//!
//! Turns raw tabular records into the fixed numeric matrix a classifier
//! consumes, with a two-phase contract: derive the output schema at training
//! time, conform to that schema at inference time. Conformance is what keeps
//! train-time and serve-time inputs aligned when one-hot categories differ
//! call to call.

mod builder;

pub use builder::{FeatureBuilder, FeatureColumns, MissingValuePolicy};
