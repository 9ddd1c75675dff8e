//! Fitted standard scaler.

use std::path::Path;

use ndarray::{Array1, Array2};
use serde::Deserialize;
use tracing::info;

use crate::artifact::{ensure_finite, read_json};
use crate::{ArtifactError, PredictError, FEATURE_COUNT};

#[derive(Debug, Deserialize)]
struct ScalerFile {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// Per-feature affine transform: `(x - mean) / scale`.
///
/// Immutable once constructed. A stored scale of zero (a constant feature at
/// fit time) is replaced by one so the feature passes through centered.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ArtifactError> {
        if mean.len() != FEATURE_COUNT || scale.len() != FEATURE_COUNT {
            return Err(ArtifactError::Invalid(format!(
                "scaler expects {} means and scales, got {} and {}",
                FEATURE_COUNT,
                mean.len(),
                scale.len()
            )));
        }
        ensure_finite("scaler mean", &mean)?;
        ensure_finite("scaler scale", &scale)?;

        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect::<Array1<f64>>();

        Ok(Self {
            mean: Array1::from(mean),
            scale,
        })
    }

    /// Loads a scaler from a JSON file of the form `{"mean": [..], "scale": [..]}`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let file: ScalerFile = read_json(path)?;
        let scaler = Self::new(file.mean, file.scale)?;
        info!(path = %path.display(), features = FEATURE_COUNT, "Loaded scaler");
        Ok(scaler)
    }

    /// Scales every row of `x`.
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>, PredictError> {
        if x.ncols() != self.mean.len() {
            return Err(PredictError::Inference(format!(
                "scaler fitted on {} features, input has {}",
                self.mean.len(),
                x.ncols()
            )));
        }
        Ok((x - &self.mean) / &self.scale)
    }
}
