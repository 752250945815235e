//! Error types for external code-set loading.

use std::path::PathBuf;

use camt_model::FieldError;
use thiserror::Error;

/// Errors that can occur while loading or resolving external code sets.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// Code-set document not found.
    #[error("Code-set document not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the code-set document.
    #[error("Failed to read code-set document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or lacks `definitions`.
    #[error("Failed to parse code-set document {file}: {source}")]
    JsonParse {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// No definition for the requested field type.
    #[error("{name} is not defined in {file}")]
    UnknownFieldType { name: String, file: String },

    /// The definition declares a value kind other than `string`.
    #[error("Unhandled type for {name}: {declared}")]
    UnsupportedType { name: String, declared: String },

    /// The definition's fields have the wrong JSON shapes.
    #[error("Malformed definition for {name}: {source}")]
    MalformedDefinition {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The definition has neither an enumeration nor a length range.
    #[error("{name} declares neither an enumeration nor a length range")]
    MissingConstraint { name: String },

    /// The declared length range is empty.
    #[error("{name} declares minLength {min} greater than maxLength {max}")]
    InvalidLengthRange { name: String, min: u32, max: u32 },
}

impl StandardsError {
    /// Field type the error is about, or the document name for load errors.
    pub fn subject(&self) -> String {
        match self {
            Self::FileNotFound { path } | Self::Io { path, .. } => path.display().to_string(),
            Self::JsonParse { file, .. } => file.clone(),
            Self::UnknownFieldType { name, .. }
            | Self::UnsupportedType { name, .. }
            | Self::MalformedDefinition { name, .. }
            | Self::MissingConstraint { name }
            | Self::InvalidLengthRange { name, .. } => name.clone(),
        }
    }
}

impl From<StandardsError> for FieldError {
    fn from(err: StandardsError) -> Self {
        FieldError::configuration(err.subject(), &err)
    }
}

/// Result type for code-set operations.
pub type Result<T> = std::result::Result<T, StandardsError>;
