//! Typed leaf values of CAMT.053 bank-to-customer statement messages.
//!
//! This crate provides:
//!
//! - **Amounts** rounded to the ISO 4217 minor unit of their currency
//! - **Codes** checked against fixed enumerations, regex patterns or external
//!   code sets
//! - **Temporals** parsed from ISO 8601 text or structured values and
//!   rendered to one of nine directives
//! - **Decimals and rates** with digit and range limits
//!
//! Each field type is configured once with an immutable rule
//! ([`AmountRule`], [`CodeRule`], [`TemporalRule`], [`DecimalRule`]) that is
//! shared by every value of that type. Values are either fully valid or not
//! constructed; every failure is a [`FieldError`].
//!
//! # Module Organization
//!
//! - [`amount`]: monetary amounts and quantization
//! - [`currency`]: currency codes and minor units
//! - [`code`]: code validation strategies
//! - [`patterns`]: ISO 20022 pattern facets
//! - [`temporal`]: date and time parsing, zones and directives
//! - [`decimal`]: decimal numbers and rates
//! - [`value`]: runtime-typed inputs and outputs

pub mod amount;
pub mod code;
pub mod currency;
pub mod decimal;
pub mod error;
pub mod patterns;
pub mod temporal;
pub mod value;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use amount::{AmountInput, AmountOptions, AmountRule, MonetaryAmount, ScaleRule};
pub use code::{
    CodeConstraint, CodeEnumeration, CodePattern, CodeRule, CodeStrategy, CodeValue,
    ExternalCodes,
};
pub use currency::CurrencyCode;
pub use decimal::{DecimalRule, DecimalValue};
pub use error::{FieldError, FieldErrorKind, Result};
pub use temporal::{Directive, TemporalConfig, TemporalInput, TemporalRule, TemporalValue, ZoneSetting};
pub use value::{AmountRequest, FieldInput, FieldValue};
