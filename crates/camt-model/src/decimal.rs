//! Bounded decimal numbers and rates (`DecimalNumber`, `PercentageRate`, ...).

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::amount::{AmountInput, total_digits};
use crate::error::{FieldError, Result};

/// Immutable configuration of a decimal field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalRule {
    field_type: Arc<str>,
    fraction_digits: u32,
    total_digits: u32,
    bounds: Option<(Decimal, Decimal)>,
}

impl DecimalRule {
    /// Decimal limited by fraction and total digit counts.
    pub fn new(field_type: impl Into<Arc<str>>, fraction_digits: u32, total_digits: u32) -> Self {
        Self {
            field_type: field_type.into(),
            fraction_digits,
            total_digits,
            bounds: None,
        }
    }

    /// Add inclusive lower and upper bounds.
    #[must_use]
    pub fn with_bounds(mut self, min: Decimal, max: Decimal) -> Self {
        self.bounds = Some((min, max));
        self
    }

    /// `PercentageRate`: 10 fraction digits, 11 total, within [0, 100].
    pub fn percentage_rate(field_type: impl Into<Arc<str>>) -> Self {
        Self::new(field_type, 10, 11).with_bounds(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }

    /// `BaseOneRate`: 10 fraction digits, 11 total, within [0, 1].
    pub fn base_one_rate(field_type: impl Into<Arc<str>>) -> Self {
        Self::new(field_type, 10, 11).with_bounds(Decimal::ZERO, Decimal::ONE)
    }

    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    /// Validate a decimal value. The value is returned unrounded.
    ///
    /// # Errors
    ///
    /// `Format` for non-numeric input, `Range` for too many digits or a value
    /// outside the bounds.
    pub fn validate(&self, value: impl Into<AmountInput>) -> Result<DecimalValue> {
        let field = self.field_type.as_ref();
        let value = value.into().to_decimal(field)?;

        if value.scale() > self.fraction_digits {
            let trimmed = value.normalize();
            if trimmed.scale() > self.fraction_digits {
                return Err(FieldError::range(
                    field,
                    value.to_string(),
                    format!("at most {} fraction digits allowed", self.fraction_digits),
                ));
            }
        }
        let digits = total_digits(&value.normalize());
        if digits > self.total_digits {
            return Err(FieldError::range(
                field,
                value.to_string(),
                format!("{digits} digits, at most {} allowed", self.total_digits),
            ));
        }
        if let Some((min, max)) = self.bounds
            && (value < min || value > max)
        {
            tracing::debug!(field, "decimal outside bounds");
            return Err(FieldError::range(
                field,
                value.to_string(),
                format!("must be within [{min}, {max}]"),
            ));
        }

        Ok(DecimalValue {
            field_type: Arc::clone(&self.field_type),
            value,
        })
    }
}

/// A validated decimal number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecimalValue {
    #[serde(skip)]
    field_type: Arc<str>,
    value: Decimal,
}

impl DecimalValue {
    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn text(&self) -> String {
        self.value.to_string()
    }
}

impl fmt::Display for DecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_bounds() {
        let rule = DecimalRule::percentage_rate("PercentageRate");
        assert_eq!(rule.validate("0").unwrap().text(), "0");
        assert_eq!(rule.validate("100").unwrap().text(), "100");
        assert_eq!(rule.validate("12.5").unwrap().text(), "12.5");
        assert!(matches!(
            rule.validate("100.01").unwrap_err(),
            FieldError::Range { .. }
        ));
        assert!(matches!(rule.validate("-1").unwrap_err(), FieldError::Range { .. }));
    }

    #[test]
    fn test_base_one_bounds() {
        let rule = DecimalRule::base_one_rate("BaseOneRate");
        assert!(rule.validate(0.75).is_ok());
        assert!(rule.validate(1_i64).is_ok());
        assert!(matches!(rule.validate(1.5).unwrap_err(), FieldError::Range { .. }));
    }

    #[test]
    fn test_fraction_digits() {
        let rule = DecimalRule::new("Number", 0, 18);
        assert!(rule.validate("42").is_ok());
        assert!(rule.validate("42.000").is_ok());
        assert!(matches!(rule.validate("42.5").unwrap_err(), FieldError::Range { .. }));
    }

    #[test]
    fn test_total_digits() {
        let rule = DecimalRule::new("DecimalNumber", 17, 18);
        assert!(rule.validate("0.12345678901234567").is_ok());
        assert!(matches!(
            rule.validate("1234567890.123456789").unwrap_err(),
            FieldError::Range { .. }
        ));
        assert!(matches!(rule.validate("abc").unwrap_err(), FieldError::Format { .. }));
    }
}
