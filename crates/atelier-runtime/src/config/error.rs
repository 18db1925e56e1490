//! Configuration errors.

use atelier_types::ErrorCode;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config file '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Failed to serialize config.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Invalid environment variable value.
    #[error("invalid value for environment variable '{name}': {message}")]
    InvalidEnvVar { name: String, message: String },

    /// A `[access.permissions]` entry names a role that does not exist.
    #[error("unknown role '{name}' in [access.permissions]")]
    UnknownRole { name: String },
}

impl ConfigError {
    /// Creates a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse TOML error.
    pub fn parse_toml(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ParseToml {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid env var error.
    pub fn invalid_env_var(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEnvVar {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an unknown role error.
    pub fn unknown_role(name: impl Into<String>) -> Self {
        Self::UnknownRole { name: name.into() }
    }
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::ReadFile { .. } => "CONFIG_READ_FILE",
            Self::ParseToml { .. } => "CONFIG_PARSE_TOML",
            Self::Serialize(_) => "CONFIG_SERIALIZE",
            Self::InvalidEnvVar { .. } => "CONFIG_INVALID_ENV_VAR",
            Self::UnknownRole { .. } => "CONFIG_UNKNOWN_ROLE",
        }
    }

    fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Serialize(_))
    }
}
