use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config directory not found")]
    ConfigDirNotFound,

    #[error(
        "config file not found. Looked in:\n\
        - current directory: stratus.kdl\n\
        - ./.stratus/ directory\n\
        - ~/.config/stratus/stratus.kdl\n\
        or set STRATUS_CONFIG_PATH to point at one directly"
    )]
    ConfigFileNotFound,

    #[error("KDL parse error in {path}: {source}")]
    Kdl {
        path: PathBuf,
        #[source]
        source: kdl::KdlError,
    },

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
