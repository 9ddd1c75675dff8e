//! Core inference types for tumorcast.
//!
//! This crate holds everything needed to turn a 30-value cell-nucleus
//! measurement vector into a malignancy prediction:
//!
//! - [`FeatureVector`] — Validated, ordered input of [`FEATURE_COUNT`] values
//! - [`StandardScaler`] — Fitted per-feature affine normalization
//! - [`DenseModel`] — Pretrained feed-forward network with a sigmoid output
//! - [`Classifier`] — Scaler + model + fixed 0.5 decision threshold
//! - [`PredictError`] and [`ArtifactError`] — Request-time and load-time failures
//!
//! # Example
//!
//! ```rust
//! use tumorcast_core::{Activation, Classifier, DenseLayer, DenseModel, StandardScaler};
//! use tumorcast_core::{Diagnosis, FEATURE_COUNT, MALIGNANT_SAMPLE};
//!
//! let scaler = StandardScaler::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT])?;
//! let layer = DenseLayer::from_rows(
//!     vec![vec![0.0]; FEATURE_COUNT],
//!     vec![0.0],
//!     Activation::Sigmoid,
//! )?;
//! let model = DenseModel::new(vec![layer])?;
//! let classifier = Classifier::new(scaler, model);
//!
//! let prediction = classifier.predict(&MALIGNANT_SAMPLE)?;
//! assert_eq!(prediction.diagnosis, Diagnosis::Malignant);
//! assert_eq!(prediction.probability, 0.5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod artifact;
mod classifier;
mod features;
mod model;
mod scaler;

pub use classifier::{Classifier, Diagnosis, Prediction, DECISION_THRESHOLD};
pub use features::{FeatureVector, BENIGN_SAMPLE, FEATURE_COUNT, FEATURE_NAMES, MALIGNANT_SAMPLE};
pub use model::{Activation, DenseLayer, DenseModel};
pub use scaler::StandardScaler;

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while classifying a single request.
#[derive(Error, Debug)]
pub enum PredictError {
    /// The request did not carry exactly [`FEATURE_COUNT`] values.
    #[error("Expected exactly {expected} feature values, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    /// Scaling or the forward pass failed after validation.
    #[error("Inference failed: {0}")]
    Inference(String),
}

/// Errors raised while loading the scaler or model artifacts.
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// The artifact file could not be read.
    #[error("Failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The artifact file is not valid JSON for its schema.
    #[error("Failed to parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The artifact parsed but its shape or values are unusable.
    #[error("Invalid artifact: {0}")]
    Invalid(String),
}
