//! Error types for the world flag set.

use thiserror::Error;

/// Failure of an environment query.
///
/// Flags never surface these directly: value parsing folds them into a
/// [`FlagParseFailed`](command_flags_core::FlagParseFailed) and suggestions
/// degrade to an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvironmentError {
    /// The environment cannot be queried right now.
    #[error("environment unavailable: {0}")]
    Unavailable(String),
    /// Looking up a specific generator failed.
    #[error("generator lookup failed for '{generator}': {reason}")]
    LookupFailed {
        /// Generator name as requested.
        generator: String,
        /// Why the lookup failed.
        reason: String,
    },
}

/// Errors loading or saving an environment config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Structurally valid YAML with invalid content.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
