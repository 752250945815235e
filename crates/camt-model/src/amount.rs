//! Currency-aware monetary amounts.
//!
//! An amount is rounded to the scale of its currency (or an explicit override)
//! with round-half-up, then optionally stripped of insignificant trailing
//! zeros. Stripping always happens after rounding.

use std::fmt;
use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::currency::CurrencyCode;
use crate::error::{FieldError, Result};

/// Maximum number of significant digits accepted in an amount.
pub const MAX_TOTAL_DIGITS: u32 = 18;

/// Largest scale a decimal can carry.
pub const MAX_SCALE: u32 = 28;

/// How the number of decimal places of an amount field is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleRule {
    /// Use the ISO 4217 minor unit of the amount's currency.
    MinorUnit,
    /// Use a fixed number of places regardless of currency.
    Fixed(u32),
}

impl ScaleRule {
    /// Resolve the scale for a currency.
    pub fn resolve(self, currency: &CurrencyCode) -> u32 {
        match self {
            Self::MinorUnit => currency.minor_unit(),
            Self::Fixed(scale) => scale,
        }
    }
}

/// Per-value amount options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmountOptions {
    /// Explicit scale, overriding the field's [`ScaleRule`].
    pub scale: Option<u32>,
    /// Remove insignificant trailing zeros after rounding.
    pub strip: bool,
}

impl AmountOptions {
    /// Override the scale.
    #[must_use]
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Enable or disable trailing-zero stripping.
    #[must_use]
    pub fn with_strip(mut self, strip: bool) -> Self {
        self.strip = strip;
        self
    }
}

/// A raw amount magnitude, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum AmountInput {
    Decimal(Decimal),
    Integer(i64),
    /// Taken from the float's shortest round-trip decimal text.
    Float(f64),
    Text(String),
}

impl AmountInput {
    /// Short description of the input kind for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Decimal(_) => "decimal",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
        }
    }

    /// Convert to an exact decimal without rounding.
    pub fn to_decimal(&self, field: &str) -> Result<Decimal> {
        match self {
            Self::Decimal(value) => Ok(*value),
            Self::Integer(value) => Ok(Decimal::from(*value)),
            Self::Float(value) => {
                if !value.is_finite() {
                    return Err(FieldError::format(field, value.to_string(), "not a finite number"));
                }
                parse_decimal(field, &value.to_string())
            }
            Self::Text(text) => parse_decimal(field, text),
        }
    }
}

impl From<Decimal> for AmountInput {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<i64> for AmountInput {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Parse decimal text exactly (plain or scientific notation).
pub(crate) fn parse_decimal(field: &str, text: &str) -> Result<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FieldError::format(field, text, "empty numeric value"));
    }
    if let Ok(value) = Decimal::from_str_exact(trimmed) {
        return Ok(value);
    }
    if let Ok(value) = Decimal::from_scientific(trimmed) {
        return Ok(value);
    }
    if looks_numeric(trimmed) {
        Err(FieldError::range(
            field,
            text,
            format!("cannot be represented exactly within {MAX_SCALE} digits"),
        ))
    } else {
        Err(FieldError::format(field, text, "not a decimal number"))
    }
}

fn looks_numeric(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    !unsigned.is_empty()
        && unsigned.chars().all(|c| c.is_ascii_digit() || c == '.')
        && unsigned.matches('.').count() <= 1
        && unsigned.chars().any(|c| c.is_ascii_digit())
}

/// Number of digits of a decimal as XML Schema `totalDigits` counts them.
///
/// Leading zeros are not significant; zeros to the right of the point are.
pub fn total_digits(value: &Decimal) -> u32 {
    let mantissa = value.mantissa().unsigned_abs();
    let mantissa_digits = if mantissa == 0 {
        1
    } else {
        mantissa.ilog10() + 1
    };
    mantissa_digits.max(value.scale())
}

/// Round `value` half-up to exactly `scale` places.
///
/// Returns `None` when the result cannot carry `scale` places.
pub fn quantize(value: Decimal, scale: u32) -> Option<Decimal> {
    if scale > MAX_SCALE {
        return None;
    }
    let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);
    (rounded.scale() == scale).then_some(rounded)
}

/// Immutable configuration of an amount field type.
///
/// Built once per field type and shared by every value of that type.
///
/// # Example
///
/// ```
/// use camt_model::{AmountOptions, AmountRule};
///
/// let rule = AmountRule::minor_unit("ActiveCurrencyAndAmount");
/// let amount = rule.normalize(123.456, "USD", AmountOptions::default()).unwrap();
/// assert_eq!(amount.text(), "123.46");
///
/// let yen = rule.normalize("123.5", "JPY", AmountOptions::default()).unwrap();
/// assert_eq!(yen.text(), "124");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountRule {
    field_type: Arc<str>,
    scale: ScaleRule,
}

impl AmountRule {
    pub fn new(field_type: impl Into<Arc<str>>, scale: ScaleRule) -> Self {
        Self {
            field_type: field_type.into(),
            scale,
        }
    }

    /// Amount type whose scale follows the ISO 4217 minor-unit table.
    pub fn minor_unit(field_type: impl Into<Arc<str>>) -> Self {
        Self::new(field_type, ScaleRule::MinorUnit)
    }

    /// Amount type with a fixed scale (e.g. 13 for `...And13DecimalAmount`).
    pub fn fixed(field_type: impl Into<Arc<str>>, scale: u32) -> Self {
        Self::new(field_type, ScaleRule::Fixed(scale))
    }

    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    pub fn scale_rule(&self) -> ScaleRule {
        self.scale
    }

    /// Validate and quantize an amount.
    ///
    /// # Errors
    ///
    /// - `Format` for a malformed currency or a non-numeric magnitude
    /// - `Range` for more than [`MAX_TOTAL_DIGITS`] digits, or a magnitude that
    ///   cannot be represented at the resolved scale. Float input is counted
    ///   after rounding, other input as given.
    pub fn normalize(
        &self,
        value: impl Into<AmountInput>,
        currency: &str,
        options: AmountOptions,
    ) -> Result<MonetaryAmount> {
        let field = self.field_type.as_ref();
        let currency = CurrencyCode::for_field(field, currency)?;
        let input = value.into();
        let exact = input.to_decimal(field)?;
        // Floats carry representation noise past the scale; count their
        // digits after rounding.
        let from_float = matches!(input, AmountInput::Float(_));
        if !from_float {
            check_total_digits(field, &exact)?;
        }

        let scale = options.scale.unwrap_or_else(|| self.scale.resolve(&currency));
        let mut magnitude = quantize(exact, scale).ok_or_else(|| {
            FieldError::range(
                field,
                exact.to_string(),
                format!("cannot be represented with {scale} decimal places"),
            )
        })?;
        if from_float {
            check_total_digits(field, &magnitude)?;
        }
        if options.strip {
            magnitude = magnitude.normalize();
        }

        Ok(MonetaryAmount {
            magnitude,
            currency,
            scale,
            stripped: options.strip,
        })
    }
}

fn check_total_digits(field: &str, value: &Decimal) -> Result<()> {
    let digits = total_digits(value);
    if digits > MAX_TOTAL_DIGITS {
        tracing::debug!(field, digits, "amount exceeds total digits");
        return Err(FieldError::range(
            field,
            value.to_string(),
            format!("{digits} digits, at most {MAX_TOTAL_DIGITS} allowed"),
        ));
    }
    Ok(())
}

/// A validated amount in an explicit currency.
///
/// The magnitude is already rounded to `scale`; unless stripped it carries
/// exactly `scale` fraction digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonetaryAmount {
    magnitude: Decimal,
    currency: CurrencyCode,
    scale: u32,
    stripped: bool,
}

impl MonetaryAmount {
    pub fn magnitude(&self) -> Decimal {
        self.magnitude
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Resolved number of decimal places the value was rounded to.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_stripped(&self) -> bool {
        self.stripped
    }

    /// Canonical decimal text, as written on the wire.
    pub fn text(&self) -> String {
        self.magnitude.to_string()
    }
}

impl fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.magnitude, self.currency)
    }
}
