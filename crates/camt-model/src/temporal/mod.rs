//! Date and time normalization.
//!
//! Normalization has two pure stages:
//!
//! 1. [`parse`] turns text or a structured value into date, time and an
//!    optional explicit offset.
//! 2. [`TemporalRule::normalize`] checks the original text for the components
//!    its [`Directive`] needs, resolves the zone and fixes the point in time.
//!
//! Rendering a [`TemporalValue`] is a pure function of that resolved point in
//! time and the directive.
//!
//! # Example
//!
//! ```
//! use camt_model::temporal::{Directive, TemporalConfig, TemporalRule, ZoneSetting};
//!
//! let rule = TemporalRule::new("ISODateTime", Directive::DateTimeUtc);
//! let config = TemporalConfig::uniform(ZoneSetting::Utc);
//! let value = rule.normalize(&config, "2019-11-25T23:59:59.999-05:00").unwrap();
//! assert_eq!(value.text(), "2019-11-26T04:59:59.999Z");
//! ```

mod directive;
mod parse;
mod zone;

use std::fmt;
use std::sync::{Arc, LazyLock};

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use regex::Regex;

pub use directive::Directive;
pub use parse::{ParsedTemporal, TemporalInput, parse};
pub use zone::{TemporalConfig, ZoneSetting};

use crate::error::{FieldError, Result};
use directive::Placement;

// =============================================================================
// COMPLETENESS PATTERNS
// =============================================================================

static HAS_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}").expect("Invalid year regex"));

static HAS_YEAR_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}").expect("Invalid year-month regex"));

static HAS_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("Invalid date regex"));

static HAS_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{2}:[0-9]{2}:[0-9]{2}").expect("Invalid time regex"));

/// Fails unless `original` textually carries every component `directive` needs.
///
/// Runs against the original text, not the parsed value, so components the
/// parser defaulted are never accepted as present.
pub fn check_completeness(field: &str, directive: Directive, original: &str) -> Result<()> {
    let missing = |component: &'static str| {
        tracing::debug!(field, component, "incomplete temporal value");
        Err(FieldError::Completeness {
            field: field.to_string(),
            value: original.to_string(),
            component,
        })
    };

    if directive.needs_day() {
        if !HAS_DATE.is_match(original) {
            return missing("date");
        }
    } else if directive.needs_month() {
        if !HAS_YEAR_MONTH.is_match(original) {
            return missing("month");
        }
    } else if directive.needs_year() && !HAS_YEAR.is_match(original) {
        return missing("year");
    }
    if directive.needs_time() && !HAS_TIME.is_match(original) {
        return missing("time");
    }
    Ok(())
}

// =============================================================================
// RULE
// =============================================================================

/// Immutable configuration of a temporal field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalRule {
    field_type: Arc<str>,
    directive: Directive,
}

impl TemporalRule {
    pub fn new(field_type: impl Into<Arc<str>>, directive: Directive) -> Self {
        Self {
            field_type: field_type.into(),
            directive,
        }
    }

    /// Build a rule from a directive name such as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// `UnsupportedDirective` for an unknown name.
    pub fn from_format(field_type: impl Into<Arc<str>>, format: &str) -> Result<Self> {
        let directive = format.parse::<Directive>().inspect_err(|_| {
            tracing::error!(format, "unsupported datetime directive");
        })?;
        Ok(Self::new(field_type, directive))
    }

    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    pub fn directive(&self) -> Directive {
        self.directive
    }

    /// Parse, check and resolve a temporal value.
    ///
    /// # Errors
    ///
    /// - `Format` when the input cannot be parsed, or names a local time that
    ///   does not exist in the zone it is resolved in
    /// - `Completeness` when the original text lacks a required component
    pub fn normalize(
        &self,
        config: &TemporalConfig,
        input: impl Into<TemporalInput>,
    ) -> Result<TemporalValue> {
        let field = self.field_type.as_ref();
        let parsed = parse(field, &input.into())?;
        check_completeness(field, self.directive, &parsed.original)?;
        let resolved = self.resolve(config, &parsed)?;

        Ok(TemporalValue {
            field_type: Arc::clone(&self.field_type),
            original: parsed.original,
            resolved,
            directive: self.directive,
        })
    }

    fn resolve(
        &self,
        config: &TemporalConfig,
        parsed: &ParsedTemporal,
    ) -> Result<DateTime<FixedOffset>> {
        let anchored = self.anchor(config, parsed)?;
        Ok(match (self.directive.placement(), parsed.has_offset()) {
            (Placement::AsWritten | Placement::Offset, _) => anchored,
            (Placement::Utc, _) => ZoneSetting::Utc.convert(anchored),
            (Placement::LocalOffset, true) => anchored,
            (Placement::LocalOffset, false) => config.local.convert(anchored),
            (Placement::Naive, true) => config.naive.convert(anchored),
            (Placement::Naive, false) => anchored,
        })
    }

    /// Place the parsed wall clock at an instant: in its own offset if it has
    /// one, in the naive zone otherwise.
    fn anchor(
        &self,
        config: &TemporalConfig,
        parsed: &ParsedTemporal,
    ) -> Result<DateTime<FixedOffset>> {
        let field = self.field_type.as_ref();
        let zone = parsed.offset.map_or(config.naive, ZoneSetting::from);
        let date = parsed.date.unwrap_or_else(|| zone.today());
        let wall = NaiveDateTime::new(date, parsed.time);
        zone.localize(wall).ok_or_else(|| {
            tracing::debug!(field, %zone, "local time does not exist");
            FieldError::format(
                field,
                parsed.original.as_str(),
                format!("local time does not exist in zone {zone}"),
            )
        })
    }
}

// =============================================================================
// VALUE
// =============================================================================

/// A validated point in time bound to its output directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalValue {
    field_type: Arc<str>,
    original: String,
    resolved: DateTime<FixedOffset>,
    directive: Directive,
}

impl TemporalValue {
    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    /// Input text, or the ISO rendering of a structured input.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Resolved instant, in the offset the directive renders with.
    pub fn resolved(&self) -> DateTime<FixedOffset> {
        self.resolved
    }

    pub fn directive(&self) -> Directive {
        self.directive
    }

    /// Canonical text for the directive. Fractions are truncated to
    /// milliseconds.
    pub fn text(&self) -> String {
        self.resolved.format(self.directive.pattern()).to_string()
    }
}

impl fmt::Display for TemporalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resolved.format(self.directive.pattern()))
    }
}
