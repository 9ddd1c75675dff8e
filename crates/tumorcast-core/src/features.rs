//! The fixed 30-value feature layout.

use ndarray::Array2;

use crate::PredictError;

/// Number of values every request must carry.
pub const FEATURE_COUNT: usize = 30;

/// Feature names in the order the scaler and model were fitted on.
///
/// Ten cell-nucleus measurements, each reported as mean, standard error and
/// worst (largest) value.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "mean radius",
    "mean texture",
    "mean perimeter",
    "mean area",
    "mean smoothness",
    "mean compactness",
    "mean concavity",
    "mean concave points",
    "mean symmetry",
    "mean fractal dimension",
    "radius error",
    "texture error",
    "perimeter error",
    "area error",
    "smoothness error",
    "compactness error",
    "concavity error",
    "concave points error",
    "symmetry error",
    "fractal dimension error",
    "worst radius",
    "worst texture",
    "worst perimeter",
    "worst area",
    "worst smoothness",
    "worst compactness",
    "worst concavity",
    "worst concave points",
    "worst symmetry",
    "worst fractal dimension",
];

/// Reference sample of a benign tumor.
pub const BENIGN_SAMPLE: [f64; FEATURE_COUNT] = [
    13.54, 14.36, 87.46, 566.3, 0.09779, 0.08129, 0.06664, 0.04781, 0.1885, 0.05766,
    0.2699, 0.7886, 2.058, 23.56, 0.008462, 0.0146, 0.02387, 0.01315, 0.0198, 0.0023,
    15.11, 19.26, 99.7, 711.2, 0.144, 0.1773, 0.239, 0.1288, 0.2977, 0.07259,
];

/// Reference sample of a malignant tumor. This is the canonical request example.
pub const MALIGNANT_SAMPLE: [f64; FEATURE_COUNT] = [
    17.99, 10.38, 122.8, 1001.0, 0.1184, 0.2776, 0.3001, 0.1471, 0.2419, 0.07871,
    1.095, 0.9053, 8.589, 153.4, 0.006399, 0.04904, 0.05373, 0.01587, 0.03003, 0.006193,
    25.38, 17.33, 184.6, 2019.0, 0.1622, 0.6656, 0.7119, 0.2654, 0.4601, 0.1189,
];

/// An input vector whose length has been checked against [`FEATURE_COUNT`].
///
/// Values themselves are not range-checked.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: &[f64]) -> Result<Self, PredictError> {
        let values: [f64; FEATURE_COUNT] =
            values.try_into().map_err(|_| PredictError::FeatureCount {
                expected: FEATURE_COUNT,
                actual: values.len(),
            })?;
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Reshapes the vector into a `1 x FEATURE_COUNT` matrix.
    pub fn to_row(&self) -> Array2<f64> {
        Array2::from_shape_fn((1, FEATURE_COUNT), |(_, col)| self.0[col])
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_exact_count() {
        let fv = FeatureVector::new(&MALIGNANT_SAMPLE).unwrap();
        assert_eq!(fv.as_slice(), &MALIGNANT_SAMPLE[..]);
    }

    #[test]
    fn test_rejects_wrong_counts() {
        for len in [0, 1, 29, 31, 60] {
            let values = vec![1.0; len];
            let err = FeatureVector::new(&values).unwrap_err();
            match err {
                PredictError::FeatureCount { expected, actual } => {
                    assert_eq!(expected, FEATURE_COUNT);
                    assert_eq!(actual, len);
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_error_message_names_expected_count() {
        let err = FeatureVector::new(&[1.0, 2.0]).unwrap_err();
        assert_eq!(err.to_string(), "Expected exactly 30 feature values, got 2");
    }

    #[test]
    fn test_to_row_preserves_order() {
        let row = FeatureVector::from(BENIGN_SAMPLE).to_row();
        assert_eq!(row.shape(), &[1, FEATURE_COUNT]);
        assert_eq!(row[[0, 0]], 13.54);
        assert_eq!(row[[0, FEATURE_COUNT - 1]], 0.07259);
    }

    #[test]
    fn test_feature_names_are_unique() {
        let mut names = FEATURE_NAMES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FEATURE_COUNT);
    }
}
