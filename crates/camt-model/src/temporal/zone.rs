//! Time zones used to resolve offset-less temporal input.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::parse::parse_offset;
use crate::error::FieldError;

/// A zone setting: the host zone, UTC, or a fixed offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ZoneSetting {
    /// Host zone, including daylight saving transitions.
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl ZoneSetting {
    /// Place a wall-clock time in this zone.
    ///
    /// Ambiguous times resolve to the earlier instant. Returns `None` for a
    /// wall-clock time skipped by a daylight saving transition.
    pub fn localize(&self, wall: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Local => Local
                .from_local_datetime(&wall)
                .earliest()
                .map(|dt| dt.fixed_offset()),
            Self::Utc => Some(Utc.from_utc_datetime(&wall).fixed_offset()),
            Self::Fixed(offset) => offset.from_local_datetime(&wall).single(),
        }
    }

    /// Express an instant in this zone.
    pub fn convert(&self, instant: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        match self {
            Self::Local => instant.with_timezone(&Local).fixed_offset(),
            Self::Utc => instant.with_timezone(&Utc).fixed_offset(),
            Self::Fixed(offset) => instant.with_timezone(offset),
        }
    }

    /// Current calendar date in this zone.
    pub fn today(&self) -> NaiveDate {
        match self {
            Self::Local => Local::now().date_naive(),
            Self::Utc => Utc::now().date_naive(),
            Self::Fixed(offset) => Utc::now().with_timezone(offset).date_naive(),
        }
    }
}

impl FromStr for ZoneSetting {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Self::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed == "Z" {
            return Ok(Self::Utc);
        }
        match parse_offset(trimmed) {
            Some(offset) if offset.local_minus_utc() == 0 => Ok(Self::Utc),
            Some(offset) => Ok(Self::Fixed(offset)),
            None => Err(FieldError::configuration(
                "ZoneSetting",
                format!("`{s}` is not `local`, `UTC` or a `+hh:mm` offset"),
            )),
        }
    }
}

impl TryFrom<String> for ZoneSetting {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ZoneSetting> for String {
    fn from(zone: ZoneSetting) -> Self {
        zone.to_string()
    }
}

impl From<FixedOffset> for ZoneSetting {
    fn from(offset: FixedOffset) -> Self {
        if offset.local_minus_utc() == 0 {
            Self::Utc
        } else {
            Self::Fixed(offset)
        }
    }
}

impl fmt::Display for ZoneSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Utc => f.write_str("UTC"),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

/// Zones used by the temporal normalizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalConfig {
    /// Process zone, used by the time-with-offset directive.
    pub local: ZoneSetting,
    /// Reference zone for offset-less input and the no-offset directives.
    pub naive: ZoneSetting,
}

impl TemporalConfig {
    /// Both zones fixed to the same setting.
    pub fn uniform(zone: ZoneSetting) -> Self {
        Self {
            local: zone,
            naive: zone,
        }
    }
}
