use std::path::PathBuf;

use crate::domain::{ConfigFile, ConfigValidationError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine the config directory")]
    NoConfigDir,
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },
    #[error("invalid config {path}: {source}")]
    Invalid {
        path: PathBuf,
        source: ConfigValidationError,
    },
}

/// Persisted configuration. A missing file loads as the default config.
pub trait ConfigStore: Send + Sync {
    fn load(&self) -> Result<ConfigFile, ConfigError>;

    fn save(&self, config: &ConfigFile) -> Result<(), ConfigError>;

    fn path(&self) -> PathBuf;
}
