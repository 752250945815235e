//! ISO 4217 currency codes and minor units.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, Result};

/// Field type name used when a currency code is validated on its own.
pub const CURRENCY_CODE_FIELD: &str = "CurrencyCode";

/// Currencies with four minor-unit digits.
const FOUR_DECIMAL_CURRENCIES: &[&str] = &["CLF", "UYW"];

/// Currencies with three minor-unit digits.
const THREE_DECIMAL_CURRENCIES: &[&str] = &["BHD", "IQD", "JOD", "KWD", "LYD", "OMR", "TND"];

/// Currencies without minor units.
const ZERO_DECIMAL_CURRENCIES: &[&str] = &["JPY", "KRW", "PYG"];

/// Minor unit used for every currency not listed above.
pub const DEFAULT_MINOR_UNIT: u32 = 2;

/// A three letter currency code (`[A-Z]{3}`).
///
/// Only the shape is checked; whether the code is active or historic is not.
///
/// # Example
///
/// ```
/// use camt_model::CurrencyCode;
///
/// let usd: CurrencyCode = "USD".parse().unwrap();
/// assert_eq!(usd.as_str(), "USD");
/// assert_eq!(usd.minor_unit(), 2);
///
/// assert!("US".parse::<CurrencyCode>().is_err());
/// assert!("usd".parse::<CurrencyCode>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Validate a currency code, reporting failures against `field`.
    pub fn for_field(field: &str, value: &str) -> Result<Self> {
        if is_currency_shape(value) {
            Ok(Self(value.to_string()))
        } else {
            tracing::debug!(field, "rejected currency code");
            Err(FieldError::format(
                field,
                value,
                "must be a 3-letter uppercase alphabetic code",
            ))
        }
    }

    /// Returns the code.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of decimal places of the currency's smallest denomination.
    pub fn minor_unit(&self) -> u32 {
        minor_unit(&self.0)
    }
}

/// Minor unit for a currency code. Unknown codes default to 2.
pub fn minor_unit(code: &str) -> u32 {
    if FOUR_DECIMAL_CURRENCIES.contains(&code) {
        4
    } else if THREE_DECIMAL_CURRENCIES.contains(&code) {
        3
    } else if ZERO_DECIMAL_CURRENCIES.contains(&code) {
        0
    } else {
        DEFAULT_MINOR_UNIT
    }
}

fn is_currency_shape(value: &str) -> bool {
    value.len() == 3 && value.bytes().all(|b| b.is_ascii_uppercase())
}

impl FromStr for CurrencyCode {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self> {
        Self::for_field(CURRENCY_CODE_FIELD, s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_units() {
        for code in ["JPY", "KRW", "PYG"] {
            assert_eq!(minor_unit(code), 0, "{code}");
        }
        for code in ["BHD", "IQD", "JOD", "KWD", "LYD", "OMR", "TND"] {
            assert_eq!(minor_unit(code), 3, "{code}");
        }
        for code in ["CLF", "UYW"] {
            assert_eq!(minor_unit(code), 4, "{code}");
        }
        for code in ["USD", "EUR", "GBP", "CHF", "XYZ"] {
            assert_eq!(minor_unit(code), 2, "{code}");
        }
    }

    #[test]
    fn test_currency_shape() {
        assert!(CurrencyCode::from_str("USD").is_ok());
        for invalid in ["US", "USDD", "123", "", "usd", "U5D", " USD"] {
            let err = CurrencyCode::from_str(invalid).unwrap_err();
            assert!(matches!(err, FieldError::Format { .. }), "{invalid}");
        }
    }

    #[test]
    fn test_serde_rejects_bad_code() {
        let ok: CurrencyCode = serde_json::from_str("\"EUR\"").unwrap();
        assert_eq!(ok.as_str(), "EUR");
        assert!(serde_json::from_str::<CurrencyCode>("\"EURO\"").is_err());
    }
}
