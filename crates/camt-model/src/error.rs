//! Error types for field validation and normalization.
//!
//! Every failure surfaces at construction time: a field value is either fully
//! valid or not produced at all. `Configuration` and `UnsupportedDirective`
//! describe broken field-type definitions and should abort startup of the
//! affected type; the remaining kinds are per-value data errors.

use thiserror::Error;

/// Unified error type for every field kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FieldError {
    // =========================================================================
    // PER-VALUE DATA ERRORS
    // =========================================================================
    /// Input does not have the shape the field type requires.
    #[error("Invalid {field}: `{value}` ({reason})")]
    Format {
        /// Field type name (e.g. `CountryCode`).
        field: String,
        /// Offending input, verbatim.
        value: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A numeric bound was violated.
    #[error("{field} out of range: `{value}` ({reason})")]
    Range {
        /// Field type name.
        field: String,
        /// Offending input, verbatim.
        value: String,
        /// Which bound was violated.
        reason: String,
    },

    /// A code is not a member of the field type's allowed set.
    #[error("Invalid {field}: `{value}`, allowed values are {allowed}")]
    Membership {
        /// Field type name.
        field: String,
        /// Normalized input that was looked up.
        value: String,
        /// Comma separated list of accepted codes.
        allowed: String,
    },

    /// Date/time text lacks a component the target directive needs.
    #[error("{field}: missing or incomplete {component} information in `{value}`")]
    Completeness {
        /// Field type name.
        field: String,
        /// Original input text.
        value: String,
        /// Missing component (`year`, `month`, `date` or `time`).
        component: &'static str,
    },

    /// Input of the wrong kind reached a field (e.g. a number for a code).
    #[error("{field} must be {expected}, got {actual}")]
    InvalidType {
        /// Field type name.
        field: String,
        /// Accepted input kind.
        expected: &'static str,
        /// Supplied input kind.
        actual: &'static str,
    },

    // =========================================================================
    // DEFINITION-TIME ERRORS
    // =========================================================================
    /// A field type was configured with an unknown temporal directive.
    #[error("Unimplemented datetime format: {directive}")]
    UnsupportedDirective {
        /// The directive name as configured.
        directive: String,
    },

    /// A field type could not be set up (missing code set, bad pattern, ...).
    #[error("Cannot configure {field}: {message}")]
    Configuration {
        /// Field type name.
        field: String,
        /// Description of the problem.
        message: String,
    },
}

/// Coarse classification of [`FieldError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldErrorKind {
    Format,
    Range,
    Membership,
    Completeness,
    InvalidType,
    UnsupportedDirective,
    Configuration,
}

impl FieldError {
    /// Returns the error kind.
    pub fn kind(&self) -> FieldErrorKind {
        match self {
            Self::Format { .. } => FieldErrorKind::Format,
            Self::Range { .. } => FieldErrorKind::Range,
            Self::Membership { .. } => FieldErrorKind::Membership,
            Self::Completeness { .. } => FieldErrorKind::Completeness,
            Self::InvalidType { .. } => FieldErrorKind::InvalidType,
            Self::UnsupportedDirective { .. } => FieldErrorKind::UnsupportedDirective,
            Self::Configuration { .. } => FieldErrorKind::Configuration,
        }
    }

    /// Returns true for errors caused by a broken field-type definition.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind(),
            FieldErrorKind::Configuration | FieldErrorKind::UnsupportedDirective
        )
    }

    pub(crate) fn format(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Format {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn range(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Range {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error for a field type.
    pub fn configuration(field: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Configuration {
            field: field.into(),
            message: message.to_string(),
        }
    }
}

/// Result type alias for field operations.
pub type Result<T> = std::result::Result<T, FieldError>;
