//! Scaler + model + decision threshold.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ArtifactError, DenseModel, FeatureVector, PredictError, StandardScaler};

/// Probabilities strictly above this are classified [`Diagnosis::Benign`].
pub const DECISION_THRESHOLD: f64 = 0.5;

/// The two output classes.
///
/// The model was fitted with benign as the positive class, so its output is
/// the probability of a benign tumor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diagnosis {
    Benign,
    Malignant,
}

impl Diagnosis {
    pub fn from_probability(probability: f64) -> Self {
        if probability > DECISION_THRESHOLD {
            Diagnosis::Benign
        } else {
            Diagnosis::Malignant
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Diagnosis::Benign => "Benign",
            Diagnosis::Malignant => "Malignant",
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub diagnosis: Diagnosis,
    /// Raw model output, unrounded.
    pub probability: f64,
}

/// Immutable inference pipeline shared by every request.
#[derive(Debug, Clone)]
pub struct Classifier {
    scaler: StandardScaler,
    model: DenseModel,
}

impl Classifier {
    pub fn new(scaler: StandardScaler, model: DenseModel) -> Self {
        Self { scaler, model }
    }

    /// Loads both artifacts, collecting every failure instead of stopping
    /// at the first one.
    pub fn load(
        model_path: impl AsRef<Path>,
        scaler_path: impl AsRef<Path>,
    ) -> Result<Self, Vec<ArtifactError>> {
        match (StandardScaler::load(scaler_path), DenseModel::load(model_path)) {
            (Ok(scaler), Ok(model)) => Ok(Self::new(scaler, model)),
            (scaler, model) => Err([scaler.err(), model.err()]
                .into_iter()
                .flatten()
                .collect()),
        }
    }

    /// Validates the length of `features`, then classifies them.
    pub fn predict(&self, features: &[f64]) -> Result<Prediction, PredictError> {
        let features = FeatureVector::new(features)?;
        self.predict_vector(&features)
    }

    pub fn predict_vector(&self, features: &FeatureVector) -> Result<Prediction, PredictError> {
        let scaled = self.scaler.transform(&features.to_row())?;
        let probability = self.model.predict(&scaled)?;
        let diagnosis = Diagnosis::from_probability(probability);

        debug!(%diagnosis, probability, "Classified feature vector");
        Ok(Prediction { diagnosis, probability })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Activation, DenseLayer, BENIGN_SAMPLE, FEATURE_COUNT, MALIGNANT_SAMPLE};
    use std::fs;

    /// Scaler centered between the two reference samples, and a logistic
    /// model that pushes the malignant sample to about sigmoid(-3).
    fn reference_classifier() -> Classifier {
        let mean = (0..FEATURE_COUNT)
            .map(|i| (MALIGNANT_SAMPLE[i] + BENIGN_SAMPLE[i]) / 2.0)
            .collect();
        let scale = (0..FEATURE_COUNT)
            .map(|i| (MALIGNANT_SAMPLE[i] - BENIGN_SAMPLE[i]).abs() / 2.0)
            .collect();
        let kernel = (0..FEATURE_COUNT)
            .map(|i| {
                if MALIGNANT_SAMPLE[i] > BENIGN_SAMPLE[i] {
                    vec![-0.1]
                } else {
                    vec![0.1]
                }
            })
            .collect();

        let scaler = StandardScaler::new(mean, scale).unwrap();
        let layer = DenseLayer::from_rows(kernel, vec![0.0], Activation::Sigmoid).unwrap();
        Classifier::new(scaler, DenseModel::new(vec![layer]).unwrap())
    }

    fn constant_classifier(bias: f64) -> Classifier {
        let scaler =
            StandardScaler::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT]).unwrap();
        let layer = DenseLayer::from_rows(
            vec![vec![0.0]; FEATURE_COUNT],
            vec![bias],
            Activation::Sigmoid,
        )
        .unwrap();
        Classifier::new(scaler, DenseModel::new(vec![layer]).unwrap())
    }

    #[test]
    fn test_threshold_rule() {
        assert_eq!(Diagnosis::from_probability(0.0), Diagnosis::Malignant);
        assert_eq!(Diagnosis::from_probability(0.5), Diagnosis::Malignant);
        assert_eq!(Diagnosis::from_probability(0.5000001), Diagnosis::Benign);
        assert_eq!(Diagnosis::from_probability(1.0), Diagnosis::Benign);
    }

    #[test]
    fn test_boundary_probability_is_malignant() {
        let prediction = constant_classifier(0.0).predict(&BENIGN_SAMPLE).unwrap();
        assert_eq!(prediction.probability, 0.5);
        assert_eq!(prediction.diagnosis, Diagnosis::Malignant);
    }

    #[test]
    fn test_just_above_boundary_is_benign() {
        let prediction = constant_classifier(1e-6).predict(&MALIGNANT_SAMPLE).unwrap();
        assert!(prediction.probability > 0.5);
        assert_eq!(prediction.diagnosis, Diagnosis::Benign);
    }

    #[test]
    fn test_reference_samples() {
        let classifier = reference_classifier();

        let malignant = classifier.predict(&MALIGNANT_SAMPLE).unwrap();
        assert_eq!(malignant.diagnosis, Diagnosis::Malignant);
        assert!((malignant.probability - Activation::Sigmoid.apply(-3.0)).abs() < 1e-9);

        let benign = classifier.predict(&BENIGN_SAMPLE).unwrap();
        assert_eq!(benign.diagnosis, Diagnosis::Benign);
        assert!((benign.probability - Activation::Sigmoid.apply(3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_predictions_are_identical() {
        let classifier = reference_classifier();
        let first = classifier.predict(&MALIGNANT_SAMPLE).unwrap();
        for _ in 0..10 {
            assert_eq!(classifier.predict(&MALIGNANT_SAMPLE).unwrap(), first);
        }
    }

    #[test]
    fn test_probability_stays_in_unit_interval() {
        let classifier = reference_classifier();
        for factor in [-1e6, -10.0, 0.0, 0.5, 3.0, 1e6] {
            let features: Vec<f64> = MALIGNANT_SAMPLE.iter().map(|v| v * factor).collect();
            let prediction = classifier.predict(&features).unwrap();
            assert!((0.0..=1.0).contains(&prediction.probability));
            assert_eq!(
                prediction.diagnosis,
                Diagnosis::from_probability(prediction.probability)
            );
        }
    }

    #[test]
    fn test_wrong_count_is_rejected_before_inference() {
        let err = reference_classifier().predict(&MALIGNANT_SAMPLE[..29]).unwrap_err();
        assert!(matches!(
            err,
            PredictError::FeatureCount { expected: 30, actual: 29 }
        ));
    }

    fn write_model(path: &Path) {
        let body = serde_json::json!({
            "layers": [{ "kernel": vec![vec![0.0]; FEATURE_COUNT], "bias": [0.0], "activation": "sigmoid" }]
        });
        fs::write(path, body.to_string()).unwrap();
    }

    #[test]
    fn test_load_reports_missing_scaler() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model.json");
        write_model(&model_path);

        let errors = Classifier::load(&model_path, dir.path().join("scaler.json")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("scaler.json"));
    }

    #[test]
    fn test_load_reports_both_missing_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model.json");
        let scaler_path = dir.path().join("scaler.json");

        let errors = Classifier::load(&model_path, &scaler_path).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| matches!(e, ArtifactError::Io { .. })));
        assert!(errors[0].to_string().contains("scaler.json"));
        assert!(errors[1].to_string().contains("model.json"));
    }

    #[test]
    fn test_load_ok() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model.json");
        let scaler_path = dir.path().join("scaler.json");
        write_model(&model_path);
        let scaler = serde_json::json!({
            "mean": vec![0.0; FEATURE_COUNT],
            "scale": vec![1.0; FEATURE_COUNT],
        });
        fs::write(&scaler_path, scaler.to_string()).unwrap();

        let classifier = Classifier::load(&model_path, &scaler_path).unwrap();
        assert_eq!(classifier.predict(&MALIGNANT_SAMPLE).unwrap().probability, 0.5);
    }

    #[test]
    fn test_huge_finite_input_is_inference_error() {
        let scaler =
            StandardScaler::new(vec![0.0; FEATURE_COUNT], vec![0.5; FEATURE_COUNT]).unwrap();
        let kernel = (0..FEATURE_COUNT)
            .map(|i| vec![if i % 2 == 0 { 1.0 } else { -1.0 }])
            .collect();
        let layer = DenseLayer::from_rows(kernel, vec![0.0], Activation::Sigmoid).unwrap();
        let classifier = Classifier::new(scaler, DenseModel::new(vec![layer]).unwrap());

        let err = classifier.predict(&[1e308; FEATURE_COUNT]).unwrap_err();
        assert!(matches!(err, PredictError::Inference(ref m) if m.contains("NaN")));
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Diagnosis::Benign.to_string(), "Benign");
        assert_eq!(Diagnosis::Malignant.to_string(), "Malignant");
    }
}
