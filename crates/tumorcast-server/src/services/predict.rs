//! Classification service.

use tumorcast_core::{FeatureVector, Prediction};

use crate::error::AppError;
use crate::ServerState;

/// Validates the feature count, then classifies with the loaded artifacts.
///
/// Validation runs first so a malformed request is reported as such even
/// when the artifacts are unavailable.
pub fn classify(state: &ServerState, features: &[f64]) -> Result<Prediction, AppError> {
    let features = FeatureVector::new(features)?;
    let classifier = state.classifier()?;
    Ok(classifier.predict_vector(&features)?)
}
