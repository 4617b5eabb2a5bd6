//! Error types for the inspector service

use civil_types::CivilError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InspectorError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] CivilError),

    #[error("Snapshot source unavailable: {0}")]
    SourceUnavailable(String),
}

pub type InspectorResult<T> = std::result::Result<T, InspectorError>;

impl From<std::io::Error> for InspectorError {
    fn from(err: std::io::Error) -> Self {
        InspectorError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for InspectorError {
    fn from(err: serde_json::Error) -> Self {
        InspectorError::SerializationError(err.to_string())
    }
}

impl From<toml::de::Error> for InspectorError {
    fn from(err: toml::de::Error) -> Self {
        InspectorError::InvalidConfig(err.to_string())
    }
}

impl From<toml::ser::Error> for InspectorError {
    fn from(err: toml::ser::Error) -> Self {
        InspectorError::SerializationError(err.to_string())
    }
}
