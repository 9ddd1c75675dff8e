//! Pretrained dense network.

use std::fmt;
use std::path::Path;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::artifact::read_json;
use crate::{ArtifactError, PredictError, FEATURE_COUNT};

/// Element-wise activation applied after a layer's affine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Sigmoid,
    Tanh,
}

impl Activation {
    pub fn apply(self, z: f64) -> f64 {
        match self {
            Activation::Linear => z,
            Activation::Relu => z.max(0.0),
            Activation::Sigmoid => 1.0 / (1.0 + (-z).exp()),
            Activation::Tanh => z.tanh(),
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Activation::Linear => "linear",
            Activation::Relu => "relu",
            Activation::Sigmoid => "sigmoid",
            Activation::Tanh => "tanh",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Deserialize)]
struct LayerFile {
    kernel: Vec<Vec<f64>>,
    bias: Vec<f64>,
    #[serde(default)]
    activation: Activation,
}

#[derive(Debug, Deserialize)]
struct ModelFile {
    layers: Vec<LayerFile>,
}

/// One fully connected layer: `activation(x · kernel + bias)`.
///
/// The kernel is stored `(inputs, units)`, the same orientation Keras uses
/// when exporting dense weights.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    kernel: Array2<f64>,
    bias: Array1<f64>,
    activation: Activation,
}

impl DenseLayer {
    pub fn new(
        kernel: Array2<f64>,
        bias: Array1<f64>,
        activation: Activation,
    ) -> Result<Self, ArtifactError> {
        if kernel.nrows() == 0 || kernel.ncols() == 0 {
            return Err(ArtifactError::Invalid("layer kernel is empty".into()));
        }
        if bias.len() != kernel.ncols() {
            return Err(ArtifactError::Invalid(format!(
                "layer has {} units but {} bias values",
                kernel.ncols(),
                bias.len()
            )));
        }
        if kernel.iter().chain(bias.iter()).any(|v| !v.is_finite()) {
            return Err(ArtifactError::Invalid(
                "layer weights contain a non-finite value".into(),
            ));
        }
        Ok(Self { kernel, bias, activation })
    }

    /// Builds a layer from kernel rows, one row per input.
    pub fn from_rows(
        rows: Vec<Vec<f64>>,
        bias: Vec<f64>,
        activation: Activation,
    ) -> Result<Self, ArtifactError> {
        let inputs = rows.len();
        let units = rows.first().map_or(0, Vec::len);
        if let Some(idx) = rows.iter().position(|r| r.len() != units) {
            return Err(ArtifactError::Invalid(format!(
                "kernel row {} has {} values, expected {}",
                idx,
                rows[idx].len(),
                units
            )));
        }

        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let kernel = Array2::from_shape_vec((inputs, units), flat)
            .map_err(|e| ArtifactError::Invalid(format!("kernel shape: {e}")))?;

        Self::new(kernel, Array1::from(bias), activation)
    }

    pub fn inputs(&self) -> usize {
        self.kernel.nrows()
    }

    pub fn units(&self) -> usize {
        self.kernel.ncols()
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    fn forward(&self, x: &Array2<f64>) -> Array2<f64> {
        let activation = self.activation;
        let mut z = x.dot(&self.kernel) + &self.bias;
        z.mapv_inplace(|v| activation.apply(v));
        z
    }
}

/// Feed-forward stack of [`DenseLayer`]s producing a single probability.
///
/// Construction guarantees the first layer accepts [`FEATURE_COUNT`] inputs,
/// adjacent layers agree on width, and the final layer is a single sigmoid
/// unit.
#[derive(Debug, Clone)]
pub struct DenseModel {
    layers: Vec<DenseLayer>,
}

impl DenseModel {
    pub fn new(layers: Vec<DenseLayer>) -> Result<Self, ArtifactError> {
        let (Some(first), Some(last)) = (layers.first(), layers.last()) else {
            return Err(ArtifactError::Invalid("model has no layers".into()));
        };

        if first.inputs() != FEATURE_COUNT {
            return Err(ArtifactError::Invalid(format!(
                "model expects {} inputs, features have {}",
                first.inputs(),
                FEATURE_COUNT
            )));
        }

        for (idx, pair) in layers.windows(2).enumerate() {
            if pair[0].units() != pair[1].inputs() {
                return Err(ArtifactError::Invalid(format!(
                    "layer {} outputs {} values but layer {} expects {}",
                    idx,
                    pair[0].units(),
                    idx + 1,
                    pair[1].inputs()
                )));
            }
        }

        if last.units() != 1 || last.activation() != Activation::Sigmoid {
            return Err(ArtifactError::Invalid(format!(
                "output layer must be 1 sigmoid unit, got {} {} unit(s)",
                last.units(),
                last.activation()
            )));
        }

        Ok(Self { layers })
    }

    /// Loads a model from a JSON file of the form
    /// `{"layers": [{"kernel": [[..]], "bias": [..], "activation": ".."}]}`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let file: ModelFile = read_json(path)?;
        let layers = file
            .layers
            .into_iter()
            .map(|l| DenseLayer::from_rows(l.kernel, l.bias, l.activation))
            .collect::<Result<Vec<_>, _>>()?;
        let model = Self::new(layers)?;
        info!(path = %path.display(), layers = model.layers.len(), "Loaded model");
        Ok(model)
    }

    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    /// Runs the forward pass on a single-row matrix and returns the output probability.
    pub fn predict(&self, x: &Array2<f64>) -> Result<f64, PredictError> {
        if x.nrows() != 1 || x.ncols() != self.layers[0].inputs() {
            return Err(PredictError::Inference(format!(
                "model expects a 1x{} input, got {}x{}",
                self.layers[0].inputs(),
                x.nrows(),
                x.ncols()
            )));
        }

        let mut out = x.to_owned();
        for layer in &self.layers {
            out = layer.forward(&out);
        }

        let probability = out[[0, 0]];
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(PredictError::Inference(format!(
                "model produced an invalid probability: {probability}"
            )));
        }
        Ok(probability)
    }
}
