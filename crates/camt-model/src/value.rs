//! Generic field input and output, used when the field kind is only known at
//! runtime (by field-type name).

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::amount::{AmountInput, AmountOptions, MonetaryAmount};
use crate::code::CodeValue;
use crate::currency::CurrencyCode;
use crate::decimal::DecimalValue;
use crate::temporal::{TemporalInput, TemporalValue};

/// Magnitude, currency and options of an amount.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountRequest {
    pub value: AmountInput,
    pub currency: String,
    pub options: AmountOptions,
}

impl AmountRequest {
    pub fn new(value: impl Into<AmountInput>, currency: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            currency: currency.into(),
            options: AmountOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: AmountOptions) -> Self {
        self.options = options;
        self
    }
}

/// A raw value for any field kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Text(String),
    Integer(i64),
    Float(f64),
    Decimal(Decimal),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
    Amount(AmountRequest),
}

impl FieldInput {
    /// Short description of the input kind for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Decimal(_) => "decimal",
            Self::Date(_) => "date",
            Self::DateTime(_) => "date-time",
            Self::Zoned(_) => "zoned date-time",
            Self::Amount(_) => "amount",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The input as a bare number, if it is one (or numeric text).
    pub fn to_number(&self) -> Option<AmountInput> {
        match self {
            Self::Text(text) => Some(AmountInput::Text(text.clone())),
            Self::Integer(value) => Some(AmountInput::Integer(*value)),
            Self::Float(value) => Some(AmountInput::Float(*value)),
            Self::Decimal(value) => Some(AmountInput::Decimal(*value)),
            _ => None,
        }
    }

    /// The input as a temporal value, if it is one (or text).
    pub fn to_temporal(&self) -> Option<TemporalInput> {
        match self {
            Self::Text(text) => Some(TemporalInput::Text(text.clone())),
            Self::Date(date) => Some(TemporalInput::Date(*date)),
            Self::DateTime(dt) => Some(TemporalInput::DateTime(*dt)),
            Self::Zoned(dt) => Some(TemporalInput::Zoned(*dt)),
            _ => None,
        }
    }
}

impl From<&str> for FieldInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldInput {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldInput {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Decimal> for FieldInput {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<NaiveDate> for FieldInput {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for FieldInput {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<DateTime<FixedOffset>> for FieldInput {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::Zoned(value)
    }
}

impl From<AmountRequest> for FieldInput {
    fn from(value: AmountRequest) -> Self {
        Self::Amount(value)
    }
}

/// A validated value of any field kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Amount(MonetaryAmount),
    Currency(CurrencyCode),
    Code(CodeValue),
    Temporal(TemporalValue),
    Decimal(DecimalValue),
}

impl FieldValue {
    /// Canonical wire text.
    pub fn text(&self) -> String {
        match self {
            Self::Amount(amount) => amount.text(),
            Self::Currency(code) => code.to_string(),
            Self::Code(code) => code.code().to_string(),
            Self::Temporal(temporal) => temporal.text(),
            Self::Decimal(decimal) => decimal.text(),
        }
    }

    pub fn as_amount(&self) -> Option<&MonetaryAmount> {
        match self {
            Self::Amount(amount) => Some(amount),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(amount) => amount.fmt(f),
            Self::Currency(code) => code.fmt(f),
            Self::Code(code) => code.fmt(f),
            Self::Temporal(temporal) => temporal.fmt(f),
            Self::Decimal(decimal) => decimal.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_conversions() {
        let input = FieldInput::from("2022-04-07");
        assert_eq!(input.kind(), "text");
        assert!(input.to_temporal().is_some());
        assert!(input.to_number().is_some());

        let input = FieldInput::from(NaiveDate::from_ymd_opt(2022, 4, 7).unwrap());
        assert!(input.as_text().is_none());
        assert!(input.to_number().is_none());
        assert!(input.to_temporal().is_some());

        let input = FieldInput::from(AmountRequest::new(1_i64, "EUR"));
        assert_eq!(input.kind(), "amount");
        assert!(input.to_temporal().is_none());
    }
}
