//! The nine output directives of ISO 20022 date and time types.

use std::fmt;
use std::str::FromStr;

use crate::error::FieldError;

/// Named output format a temporal value renders to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// `YYYY`
    Year,
    /// `YYYY-MM`
    YearMonth,
    /// `YYYY-MM-DD`
    Date,
    /// `YYYY-MM-DDThh:mm:ss.sssZ`
    DateTimeUtc,
    /// `YYYY-MM-DDThh:mm:ss.sss+/-hh:mm`
    DateTimeOffset,
    /// `YYYY-MM-DDThh:mm:ss.sss`
    DateTimeNaive,
    /// `hh:mm:ss.sssZ`
    TimeUtc,
    /// `hh:mm:ss.sss+/-hh:mm`
    TimeOffset,
    /// `hh:mm:ss.sss`
    TimeNaive,
}

/// How the resolved point in time is positioned before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    /// Wall clock as written; offset-less input is placed in the naive zone.
    AsWritten,
    /// Converted to UTC.
    Utc,
    /// Explicit offset kept; offset-less input is placed in the naive zone.
    Offset,
    /// Explicit offset kept; offset-less input is placed in the naive zone,
    /// then converted to the process zone.
    LocalOffset,
    /// Converted to the naive zone.
    Naive,
}

impl Directive {
    pub const ALL: [Directive; 9] = [
        Self::Year,
        Self::YearMonth,
        Self::Date,
        Self::DateTimeUtc,
        Self::DateTimeOffset,
        Self::DateTimeNaive,
        Self::TimeUtc,
        Self::TimeOffset,
        Self::TimeNaive,
    ];

    /// The directive's published format name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Year => "YYYY",
            Self::YearMonth => "YYYY-MM",
            Self::Date => "YYYY-MM-DD",
            Self::DateTimeUtc => "YYYY-MM-DDThh:mm:ss.sssZ",
            Self::DateTimeOffset => "YYYY-MM-DDThh:mm:ss.sss+/-hh:mm",
            Self::DateTimeNaive => "YYYY-MM-DDThh:mm:ss.sss",
            Self::TimeUtc => "hh:mm:ss.sssZ",
            Self::TimeOffset => "hh:mm:ss.sss+/-hh:mm",
            Self::TimeNaive => "hh:mm:ss.sss",
        }
    }

    /// `chrono` format string producing the canonical text.
    pub(crate) fn pattern(self) -> &'static str {
        match self {
            Self::Year => "%Y",
            Self::YearMonth => "%Y-%m",
            Self::Date => "%Y-%m-%d",
            Self::DateTimeUtc => "%Y-%m-%dT%H:%M:%S%.3fZ",
            Self::DateTimeOffset => "%Y-%m-%dT%H:%M:%S%.3f%:z",
            Self::DateTimeNaive => "%Y-%m-%dT%H:%M:%S%.3f",
            Self::TimeUtc => "%H:%M:%S%.3fZ",
            Self::TimeOffset => "%H:%M:%S%.3f%:z",
            Self::TimeNaive => "%H:%M:%S%.3f",
        }
    }

    pub(crate) fn placement(self) -> Placement {
        match self {
            Self::Year | Self::YearMonth | Self::Date => Placement::AsWritten,
            Self::DateTimeUtc | Self::TimeUtc => Placement::Utc,
            Self::DateTimeOffset => Placement::Offset,
            Self::TimeOffset => Placement::LocalOffset,
            Self::DateTimeNaive | Self::TimeNaive => Placement::Naive,
        }
    }

    pub fn needs_year(self) -> bool {
        !self.is_time_only()
    }

    pub fn needs_month(self) -> bool {
        !matches!(self, Self::Year) && self.needs_year()
    }

    pub fn needs_day(self) -> bool {
        !matches!(self, Self::Year | Self::YearMonth) && self.needs_year()
    }

    pub fn needs_time(self) -> bool {
        !matches!(self, Self::Year | Self::YearMonth | Self::Date)
    }

    pub fn is_time_only(self) -> bool {
        matches!(self, Self::TimeUtc | Self::TimeOffset | Self::TimeNaive)
    }
}

impl FromStr for Directive {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|directive| directive.name() == s)
            .ok_or_else(|| FieldError::UnsupportedDirective {
                directive: s.to_string(),
            })
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_back() {
        for directive in Directive::ALL {
            assert_eq!(directive.name().parse::<Directive>().unwrap(), directive);
        }
    }

    #[test]
    fn test_unknown_directive() {
        let err = "DD/MM/YYYY".parse::<Directive>().unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "Unimplemented datetime format: DD/MM/YYYY");
    }

    #[test]
    fn test_components() {
        assert!(Directive::Year.needs_year());
        assert!(!Directive::Year.needs_month());
        assert!(Directive::YearMonth.needs_month());
        assert!(!Directive::YearMonth.needs_day());
        assert!(Directive::DateTimeUtc.needs_day());
        assert!(Directive::DateTimeUtc.needs_time());
        assert!(!Directive::TimeNaive.needs_year());
        assert!(Directive::TimeNaive.needs_time());
    }
}
