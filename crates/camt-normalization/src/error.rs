//! Error types for registry setup and configuration loading.

use std::path::PathBuf;

use camt_model::FieldError;
use camt_standards::StandardsError;
use thiserror::Error;

/// Errors raised while configuring field types.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NormalizationError {
    /// Configuration file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML or has unexpected values.
    #[error("Failed to parse config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A field type could not be set up, or a value failed validation.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// External code sets could not be loaded.
    #[error(transparent)]
    Standards(#[from] StandardsError),
}

impl NormalizationError {
    /// True for errors that are about configuration rather than a single value.
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::Field(err) => err.is_fatal(),
            _ => true,
        }
    }
}

/// Result type for normalization setup.
pub type Result<T> = std::result::Result<T, NormalizationError>;
