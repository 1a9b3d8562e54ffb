//! Error types for gostrap-core

use thiserror::Error;

/// Result type alias using gostrap-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration and environment errors
#[derive(Error, Debug)]
pub enum Error {
    /// Embedded or on-disk configuration file is missing
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Configuration parsed but holds an unusable value
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Home directory could not be determined
    #[error("Could not determine home directory")]
    HomeDirNotFound,

    /// Path is not valid UTF-8
    #[error("Path is not valid UTF-8: {path}")]
    NonUtf8Path { path: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
