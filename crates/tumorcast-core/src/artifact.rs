//! JSON artifact file reading shared by the scaler and model loaders.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::ArtifactError;

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let content = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn ensure_finite(what: &str, values: &[f64]) -> Result<(), ArtifactError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(ArtifactError::Invalid(format!(
            "{what} contains a non-finite value at index {idx}"
        ))),
        None => Ok(()),
    }
}
