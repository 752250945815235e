//! ISO 20022 external code sets.
//!
//! External code sets are business code lists maintained outside the message
//! schema (bank transaction codes, purpose codes, identification schemes).
//! Each entry is keyed by its field-type name and either lists the accepted
//! codes or only publishes a length range.
//!
//! # Module Organization
//!
//! - [`embedded`]: the document compiled into the binary
//! - [`source`]: pluggable document sources ([`CodeSetSource`])
//! - [`types`]: document and definition types
//! - [`provider`]: the lazily loaded, cached [`CodeSetProvider`]
//! - [`paths`]: `CAMT_CODE_SETS` override
//!
//! # Example
//!
//! ```
//! use camt_standards::CodeSetProvider;
//!
//! let provider = CodeSetProvider::embedded();
//! let rule = provider.code_rule("ExternalEntryStatus1Code").unwrap();
//! assert_eq!(rule.validate("book").unwrap().code(), "BOOK");
//! ```

pub mod embedded;
pub mod error;
pub mod paths;
pub mod provider;
pub mod source;
pub mod types;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use error::{Result, StandardsError};
pub use paths::{CODE_SETS_ENV_VAR, default_source};
pub use provider::CodeSetProvider;
pub use source::{CodeSetSource, EmbeddedSource, FileSource, StaticSource};
pub use types::{CodeSetDefinition, CodeSetDocument, RawDefinition};
