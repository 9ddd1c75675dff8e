use anyhow::bail;
use tracing::{error, info, warn};
use tumorcast_config::ServerConfig;
use tumorcast_core::Classifier;

use crate::error::AppError;

/// Outcome of loading the artifacts at startup.
pub enum Artifacts {
    Ready(Classifier),
    Unavailable(String),
}

/// Process-wide read-only state, built once before the router starts.
pub struct ServerState {
    artifacts: Artifacts,
}

impl ServerState {
    pub fn ready(classifier: Classifier) -> Self {
        Self { artifacts: Artifacts::Ready(classifier) }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self { artifacts: Artifacts::Unavailable(reason.into()) }
    }

    /// Loads the scaler and model, logging each failure separately.
    pub fn load(config: &ServerConfig) -> Self {
        match Classifier::load(&config.model_path, &config.scaler_path) {
            Ok(classifier) => {
                info!("Classifier ready");
                Self::ready(classifier)
            }
            Err(errors) => {
                for e in &errors {
                    error!("Artifact failed to load: {}", e);
                }
                warn!("Inference disabled, serving liveness checks only");
                let reason = errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                Self::unavailable(reason)
            }
        }
    }

    /// Loads the state, refusing to continue in strict mode when any
    /// artifact is missing or invalid.
    pub fn startup(config: &ServerConfig) -> anyhow::Result<Self> {
        let state = Self::load(config);
        if let Some(reason) = state.load_error() {
            if config.strict_startup {
                bail!("artifact load failed: {}", reason);
            }
        }
        Ok(state)
    }

    pub fn load_error(&self) -> Option<&str> {
        match &self.artifacts {
            Artifacts::Ready(_) => None,
            Artifacts::Unavailable(reason) => Some(reason),
        }
    }

    pub fn classifier(&self) -> Result<&Classifier, AppError> {
        match &self.artifacts {
            Artifacts::Ready(classifier) => Ok(classifier),
            Artifacts::Unavailable(reason) => Err(AppError::Unavailable(format!(
                "Model artifacts are not loaded: {reason}"
            ))),
        }
    }
}
