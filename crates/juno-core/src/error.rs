//! Error types for the interaction engine.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for fallible engine operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while preparing an engine. Interaction itself never fails.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A motion configuration value is out of range.
    #[error("invalid motion config: {0}")]
    InvalidConfig(String),

    /// A config file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// A config file is not valid TOML for a motion config.
    #[error("failed to parse motion config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A config could not be rendered as TOML.
    #[error("failed to render motion config: {0}")]
    Render(#[from] toml::ser::Error),
}
