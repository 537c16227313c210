use std::path::PathBuf;
use thiserror::Error;

/// Result type for refiner operations
pub type Result<T> = std::result::Result<T, RefinerError>;

/// Errors that can occur while refining Markdown files
#[derive(Error, Debug)]
pub enum RefinerError {
    /// Target directory is missing or is not a directory
    #[error("Directory '{}' does not exist", .0.display())]
    MissingDirectory(PathBuf),

    /// File could not be read or is not valid UTF-8
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File could not be written back
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file is not valid TOML
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl RefinerError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
