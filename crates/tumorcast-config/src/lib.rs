use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Error
// ─────────────────────────────────────────────────────────────────────────────

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Invalid bind address in {var}: {value}")]
    BindAddr { var: &'static str, value: String },

    #[error("Invalid boolean in {var}: {value} (expected true/false)")]
    Bool { var: &'static str, value: String },

    #[error("Empty path in {0}")]
    EmptyPath(&'static str),
}

// ─────────────────────────────────────────────────────────────────────────────
// Variables
// ─────────────────────────────────────────────────────────────────────────────

pub const BIND_ADDR_VAR: &str = "TUMORCAST_BIND_ADDR";
pub const MODEL_PATH_VAR: &str = "TUMORCAST_MODEL_PATH";
pub const SCALER_PATH_VAR: &str = "TUMORCAST_SCALER_PATH";
pub const STRICT_STARTUP_VAR: &str = "TUMORCAST_STRICT_STARTUP";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_MODEL_PATH: &str = "artifacts/model.json";
const DEFAULT_SCALER_PATH: &str = "artifacts/scaler.json";

// ─────────────────────────────────────────────────────────────────────────────
// Server Config
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
    /// Abort startup when an artifact fails to load instead of serving
    /// liveness checks only.
    pub strict_startup: bool,
}

impl ServerConfig {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`. Unset variables take their
    /// defaults, as do a blank bind address or strict flag. A blank model or
    /// scaler path is rejected with [`ConfigError::EmptyPath`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_value = get(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_value
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::BindAddr {
                var: BIND_ADDR_VAR,
                value: bind_value.clone(),
            })?;

        let model_path =
            path_or_default(lookup(MODEL_PATH_VAR), MODEL_PATH_VAR, DEFAULT_MODEL_PATH)?;
        let scaler_path =
            path_or_default(lookup(SCALER_PATH_VAR), SCALER_PATH_VAR, DEFAULT_SCALER_PATH)?;

        let strict_startup = match get(STRICT_STARTUP_VAR) {
            Some(v) => parse_bool(STRICT_STARTUP_VAR, &v)?,
            None => false,
        };

        Ok(Self {
            bind_addr,
            model_path,
            scaler_path,
            strict_startup,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            scaler_path: PathBuf::from(DEFAULT_SCALER_PATH),
            strict_startup: false,
        }
    }
}

fn path_or_default(
    value: Option<String>,
    var: &'static str,
    default: &str,
) -> Result<PathBuf, ConfigError> {
    match value {
        None => Ok(PathBuf::from(default)),
        Some(v) if v.trim().is_empty() => Err(ConfigError::EmptyPath(var)),
        Some(v) => Ok(PathBuf::from(v.trim())),
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Bool {
            var,
            value: value.to_string(),
        }),
    }
}
