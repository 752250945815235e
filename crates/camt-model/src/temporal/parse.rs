//! Phase one of temporal normalization: turn input into date, time and offset.
//!
//! Accepted text (ISO 8601 extended format):
//!
//! - `YYYY`, `YYYY-MM` or `YYYY-MM-DD`, optionally followed by `T` or a space
//!   and `hh:mm[:ss[.fraction]]`
//! - a bare `hh:mm[:ss[.fraction]]`
//!
//! Either form may end in `Z` (UTC) or `+hh:mm`/`-hh:mm`. Missing calendar
//! components default to 1 and missing time components to 0; the completeness
//! checks against the original text decide whether that defaulting is
//! acceptable for a directive.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc};
use regex::{Captures, Regex};

use crate::error::{FieldError, Result};

static DATE_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<year>[0-9]{4})(?:-(?P<month>[0-9]{2})(?:-(?P<day>[0-9]{2}))?)?(?:[T ](?P<hour>[0-9]{2}):(?P<minute>[0-9]{2})(?::(?P<second>[0-9]{2})(?:[.,](?P<fraction>[0-9]+))?)?)?(?P<zone>Z|[+-][0-9]{2}:[0-9]{2})?$",
    )
    .expect("Invalid date text regex")
});

static TIME_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<hour>[0-9]{2}):(?P<minute>[0-9]{2})(?::(?P<second>[0-9]{2})(?:[.,](?P<fraction>[0-9]+))?)?(?P<zone>Z|[+-][0-9]{2}:[0-9]{2})?$",
    )
    .expect("Invalid time text regex")
});

static OFFSET_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<sign>[+-])(?P<hours>[0-9]{2}):(?P<minutes>[0-9]{2})$")
        .expect("Invalid offset regex")
});

/// Raw temporal input: free text or a structured value.
#[derive(Debug, Clone, PartialEq)]
pub enum TemporalInput {
    Text(String),
    Date(NaiveDate),
    /// Offset-less; resolved in the configured naive zone.
    DateTime(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
}

impl TemporalInput {
    /// Text the completeness checks run against.
    ///
    /// Structured values use their ISO 8601 rendering.
    pub fn original_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Date(date) => date.format("%Y-%m-%d").to_string(),
            Self::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            Self::Zoned(dt) => dt.to_rfc3339(),
        }
    }
}

impl From<&str> for TemporalInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TemporalInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDate> for TemporalInput {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for TemporalInput {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<DateTime<FixedOffset>> for TemporalInput {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::Zoned(value)
    }
}

impl From<DateTime<Utc>> for TemporalInput {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Zoned(value.fixed_offset())
    }
}

/// Parsed components, before any zone is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTemporal {
    /// Input text, or the ISO rendering of a structured input.
    pub original: String,
    /// `None` for a bare time of day.
    pub date: Option<NaiveDate>,
    pub time: NaiveTime,
    /// Explicit offset; `Z` parses as UTC.
    pub offset: Option<FixedOffset>,
}

impl ParsedTemporal {
    /// True when the original text ends in `Z` or `+hh:mm`/`-hh:mm`.
    pub fn has_offset(&self) -> bool {
        self.offset.is_some()
    }
}

/// Parse temporal input for `field`.
///
/// # Errors
///
/// `Format` when the text is not a recognised date or time, or a component
/// is out of range.
pub fn parse(field: &str, input: &TemporalInput) -> Result<ParsedTemporal> {
    let original = input.original_text();
    match input {
        TemporalInput::Text(text) => parse_text(field, text),
        TemporalInput::Date(date) => Ok(ParsedTemporal {
            original,
            date: Some(*date),
            time: NaiveTime::MIN,
            offset: None,
        }),
        TemporalInput::DateTime(dt) => Ok(ParsedTemporal {
            original,
            date: Some(dt.date()),
            time: dt.time(),
            offset: None,
        }),
        TemporalInput::Zoned(dt) => Ok(ParsedTemporal {
            original,
            date: Some(dt.date_naive()),
            time: dt.time(),
            offset: Some(*dt.offset()),
        }),
    }
}

fn parse_text(field: &str, text: &str) -> Result<ParsedTemporal> {
    let (date, caps) = if let Some(caps) = DATE_TEXT.captures(text) {
        let year = number(field, text, &caps, "year")?.unwrap_or(0);
        let month = number(field, text, &caps, "month")?.unwrap_or(1);
        let day = number(field, text, &caps, "day")?.unwrap_or(1);
        let date = i32::try_from(year)
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
            .ok_or_else(|| FieldError::format(field, text, "date component out of range"))?;
        (Some(date), caps)
    } else if let Some(caps) = TIME_TEXT.captures(text) {
        (None, caps)
    } else {
        tracing::debug!(field, "unrecognised temporal text");
        return Err(FieldError::format(field, text, "not a recognised date or time"));
    };

    let nanos = match caps.name("fraction") {
        Some(m) => fraction_nanos(m.as_str())
            .ok_or_else(|| FieldError::format(field, text, "fraction is not decimal digits"))?,
        None => 0,
    };
    let time = NaiveTime::from_hms_nano_opt(
        number(field, text, &caps, "hour")?.unwrap_or(0),
        number(field, text, &caps, "minute")?.unwrap_or(0),
        number(field, text, &caps, "second")?.unwrap_or(0),
        nanos,
    )
    .ok_or_else(|| FieldError::format(field, text, "time component out of range"))?;

    let offset = match caps.name("zone").map(|m| m.as_str()) {
        None => None,
        Some("Z") => Some(Utc.fix()),
        Some(zone) => Some(
            parse_offset(zone)
                .ok_or_else(|| FieldError::format(field, text, "offset out of range"))?,
        ),
    };

    Ok(ParsedTemporal {
        original: text.to_string(),
        date,
        time,
        offset,
    })
}

/// Captured component `name`; `None` only when the text omits it.
fn number(field: &str, text: &str, caps: &Captures<'_>, name: &str) -> Result<Option<u32>> {
    let Some(m) = caps.name(name) else {
        return Ok(None);
    };
    let digits = m.as_str();
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::format(field, text, "component is not ASCII digits"));
    }
    digits
        .parse()
        .map(Some)
        .map_err(|_| FieldError::format(field, text, "component out of range"))
}

/// Fraction digits to nanoseconds, truncating past nine digits.
fn fraction_nanos(digits: &str) -> Option<u32> {
    let mut nanos = 0u32;
    for (i, c) in digits.chars().enumerate() {
        if !c.is_ascii_digit() {
            return None;
        }
        if i < 9 {
            nanos += c.to_digit(10)? * 10u32.pow(8 - i as u32);
        }
    }
    Some(nanos)
}

/// Parse `+hh:mm` / `-hh:mm`.
pub(crate) fn parse_offset(text: &str) -> Option<FixedOffset> {
    let caps = OFFSET_TEXT.captures(text)?;
    let hours: i32 = caps["hours"].parse().ok()?;
    let minutes: i32 = caps["minutes"].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    let seconds = hours * 3600 + minutes * 60;
    match &caps["sign"] {
        "-" => FixedOffset::west_opt(seconds),
        _ => FixedOffset::east_opt(seconds),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    fn text(s: &str) -> Result<ParsedTemporal> {
        parse("ISODateTime", &TemporalInput::from(s))
    }

    #[test]
    fn test_full_date_time_with_offset() {
        let parsed = text("2019-11-25T23:59:59.999-05:00").unwrap();
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2019, 11, 25));
        assert_eq!(parsed.time.nanosecond(), 999_000_000);
        assert_eq!(parsed.offset, FixedOffset::west_opt(5 * 3600));
    }

    #[test]
    fn test_space_separator_and_utc_marker() {
        let parsed = text("2023-04-06 23:59:59Z").unwrap();
        assert_eq!(parsed.time, NaiveTime::from_hms_opt(23, 59, 59).unwrap());
        assert_eq!(parsed.offset, FixedOffset::east_opt(0));
    }

    #[test]
    fn test_partial_dates_default_components() {
        let parsed = text("2018").unwrap();
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2018, 1, 1));
        assert!(!parsed.has_offset());
        let parsed = text("2018-07").unwrap();
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2018, 7, 1));
    }

    #[test]
    fn test_bare_time() {
        let parsed = text("09:30:00.5+01:00").unwrap();
        assert_eq!(parsed.date, None);
        assert_eq!(parsed.time.nanosecond(), 500_000_000);
        assert_eq!(parsed.offset, FixedOffset::east_opt(3600));
    }

    #[test]
    fn test_rejects_malformed_text() {
        for bad in ["20", "22-3", "invalid", "2022-13", "2022-01-32", "2022-00", "25:00:00", ""] {
            let err = text(bad).unwrap_err();
            assert!(matches!(err, FieldError::Format { .. }), "{bad}");
        }
    }

    #[test]
    fn test_rejects_non_ascii_digits() {
        for bad in [
            "\u{662}\u{660}\u{661}\u{669}-\u{661}\u{661}-\u{662}\u{665}",
            "\u{662}\u{660}\u{661}\u{669}",
            "\u{661}\u{662}:30:00",
            "2019-11-\u{662}\u{665}",
            "12:30:00.\u{665}",
            "\u{ff12}\u{ff10}\u{ff11}\u{ff19}",
        ] {
            let err = text(bad).unwrap_err();
            assert!(matches!(err, FieldError::Format { .. }), "{bad}");
        }
    }

    #[test]
    fn test_fraction_nanos() {
        assert_eq!(fraction_nanos("5"), Some(500_000_000));
        assert_eq!(fraction_nanos("1234567891"), Some(123_456_789));
        assert_eq!(fraction_nanos("1\u{665}"), None);
    }

    #[test]
    fn test_offset_shapes() {
        assert_eq!(parse_offset("+05:30"), FixedOffset::east_opt(19_800));
        assert_eq!(parse_offset("-00:00"), FixedOffset::west_opt(0));
        assert_eq!(parse_offset("+0530"), None);
        assert_eq!(parse_offset("+05:60"), None);
    }

    #[test]
    fn test_structured_original_text() {
        let date = NaiveDate::from_ymd_opt(2022, 4, 7).unwrap();
        assert_eq!(TemporalInput::from(date).original_text(), "2022-04-07");
        let dt = date.and_hms_milli_opt(8, 15, 0, 250).unwrap();
        assert_eq!(
            TemporalInput::from(dt).original_text(),
            "2022-04-07T08:15:00.250"
        );
    }
}
