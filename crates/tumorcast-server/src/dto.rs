use serde::{Deserialize, Serialize};
use tumorcast_core::{Diagnosis, Prediction};

// === Inference ===

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub features: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: Diagnosis,
    pub probability: f64,
}

impl From<Prediction> for PredictResponse {
    fn from(p: Prediction) -> Self {
        Self {
            prediction: p.diagnosis,
            probability: p.probability,
        }
    }
}

// === Status ===

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: &'static str,
}

// === Feature schema ===

#[derive(Debug, Serialize)]
pub struct FeatureSamples {
    pub benign: &'static [f64],
    pub malignant: &'static [f64],
}

#[derive(Debug, Serialize)]
pub struct FeatureSchemaResponse {
    pub count: usize,
    pub threshold: f64,
    pub names: &'static [&'static str],
    pub samples: FeatureSamples,
}
