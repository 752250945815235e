//! Error types for XML rendering.

use thiserror::Error;

/// Errors raised while writing XML.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OutputError {
    /// Element or attribute name is not a valid XML name.
    #[error("Invalid XML name `{name}`")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// Rendered document is not UTF-8.
    #[error("Rendered XML is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML writing error.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Result type alias for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
