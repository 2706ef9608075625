//! Error types for pipeline dispatch.

use crate::snapshot::NoMatchReport;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Manifest authoring errors
    #[error("Annotation is not in `[item, ...]` format: {0:?}")]
    MalformedAnnotation(String),

    #[error("Annotation list is empty: {0:?}")]
    EmptyAnnotation(String),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    // Matching outcome
    #[error("{0}")]
    NoMatchFound(Box<NoMatchReport>),

    // Infrastructure errors
    #[error("Repository lookup failed: {0}")]
    Resolver(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Errors that require a manifest fix rather than a retry.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::MalformedAnnotation(_) | Error::EmptyAnnotation(_) | Error::InvalidManifest(_)
        )
    }

    pub fn no_match_report(&self) -> Option<&NoMatchReport> {
        match self {
            Error::NoMatchFound(report) => Some(report),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
