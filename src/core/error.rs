use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to load the property resource. Fatal: nothing can be configured without it.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("Could not load properties from {path:?}, streams cannot be configured")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed property on line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Initialization(#[from] InitializationError),

    #[error("Required property '{0}' is not set")]
    MissingKey(String),

    #[error("Property '{key}' has value {value:?} which is not a valid {expected}")]
    Parse {
        key: String,
        value: String,
        expected: &'static str,
    },
}

impl ConfigError {
    /// The property key this error is about, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::MissingKey(key) | ConfigError::Parse { key, .. } => Some(key.as_str()),
            ConfigError::Initialization(_) => None,
        }
    }
}
