use std::path::PathBuf;
use thiserror::Error;

/// Resource lookup errors
///
/// Rows never surface these; lookups fall back to an empty result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("No resource id set")]
    Unset,

    #[error("Unknown resource: {0}")]
    NotFound(String),
}

/// Config file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to determine config path")]
    NoConfigPath,

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;
