//! Field-type registry and the CAMT.053 catalog.
//!
//! A [`FieldTypeRegistry`] maps ISO 20022 datatype names to immutable rules
//! and dispatches raw values to the matching normalizer. Registries are built
//! once from a [`NormalizationConfig`] and shared read-only afterwards.
//!
//! # Example
//!
//! ```
//! use camt_model::{AmountRequest, TemporalConfig, ZoneSetting};
//! use camt_normalization::catalog;
//! use camt_standards::CodeSetProvider;
//!
//! let registry = catalog::camt053(
//!     TemporalConfig::uniform(ZoneSetting::Utc),
//!     &CodeSetProvider::embedded(),
//! )
//! .unwrap();
//!
//! let amount = registry
//!     .validate("ActiveCurrencyAndAmount", AmountRequest::new("123.5", "JPY"))
//!     .unwrap();
//! assert_eq!(amount.text(), "124");
//!
//! let code = registry.validate("CreditDebitCode", "crdt").unwrap();
//! assert_eq!(code.text(), "CRDT");
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod registry;

pub use config::{CodeSetSettings, NormalizationConfig};
pub use error::{NormalizationError, Result};
pub use registry::{FieldKind, FieldRule, FieldTypeRegistry, RegistryBuilder};
