//! Integration tests for temporal normalization.
//!
//! Zones are fixed offsets so results do not depend on the host zone.

use chrono::{FixedOffset, NaiveDate, TimeZone};
use proptest::prelude::*;

use camt_model::temporal::{Directive, TemporalConfig, TemporalRule, ZoneSetting};
use camt_model::{FieldError, FieldErrorKind};

fn fixed(hours: i32) -> ZoneSetting {
    ZoneSetting::Fixed(FixedOffset::east_opt(hours * 3600).unwrap())
}

/// Central European winter time for both zones.
fn winter() -> TemporalConfig {
    TemporalConfig::uniform(fixed(1))
}

/// Central European summer time for both zones.
fn summer() -> TemporalConfig {
    TemporalConfig::uniform(fixed(2))
}

fn render(config: &TemporalConfig, directive: Directive, input: &str) -> String {
    TemporalRule::new("Test", directive)
        .normalize(config, input)
        .unwrap_or_else(|e| panic!("{directive} rejected {input}: {e}"))
        .text()
}

fn reject(directive: Directive, input: &str) -> FieldError {
    match TemporalRule::new("Test", directive).normalize(&winter(), input) {
        Ok(value) => panic!("{directive} accepted {input} as {}", value.text()),
        Err(err) => err,
    }
}

#[test]
fn test_date_directives() {
    let config = summer();
    assert_eq!(render(&config, Directive::Year, "2022"), "2022");
    assert_eq!(render(&config, Directive::Year, "2022-04-07T10:00:00Z"), "2022");
    assert_eq!(render(&config, Directive::YearMonth, "2022-04"), "2022-04");
    assert_eq!(render(&config, Directive::YearMonth, "2022-04-07"), "2022-04");
    assert_eq!(render(&config, Directive::Date, "2022-04-07"), "2022-04-07");
    assert_eq!(
        render(&config, Directive::Date, "2019-11-25T23:59:59.999-05:00"),
        "2019-11-25"
    );
}

#[test]
fn test_utc_directives() {
    let config = summer();
    assert_eq!(
        render(&config, Directive::DateTimeUtc, "2019-11-25T23:59:59.999-05:00"),
        "2019-11-26T04:59:59.999Z"
    );
    assert_eq!(
        render(&config, Directive::DateTimeUtc, "2023-04-06 23:59:59Z"),
        "2023-04-06T23:59:59.000Z"
    );
    assert_eq!(
        render(&config, Directive::DateTimeUtc, "2023-04-06T23:59:59"),
        "2023-04-06T21:59:59.000Z"
    );
    assert_eq!(render(&config, Directive::TimeUtc, "23:59:59Z"), "23:59:59.000Z");
    assert_eq!(render(&config, Directive::TimeUtc, "23:59:59+02:00"), "21:59:59.000Z");
}

#[test]
fn test_offset_directives() {
    let config = summer();
    assert_eq!(
        render(&config, Directive::DateTimeOffset, "2019-11-25T23:59:59.999-05:00"),
        "2019-11-25T23:59:59.999-05:00"
    );
    assert_eq!(
        render(&config, Directive::DateTimeOffset, "2023-04-06T23:59:59"),
        "2023-04-06T23:59:59.000+02:00"
    );
    assert_eq!(
        render(&config, Directive::TimeOffset, "23:59:59-05:00"),
        "23:59:59.000-05:00"
    );
}

#[test]
fn test_time_offset_converts_to_process_zone() {
    let config = TemporalConfig {
        local: fixed(2),
        naive: fixed(1),
    };
    assert_eq!(
        render(&config, Directive::TimeOffset, "10:00:00"),
        "11:00:00.000+02:00"
    );
    assert_eq!(
        render(&config, Directive::DateTimeOffset, "2023-04-06T10:00:00"),
        "2023-04-06T10:00:00.000+01:00"
    );
}

#[test]
fn test_naive_directives() {
    let config = winter();
    assert_eq!(
        render(&config, Directive::DateTimeNaive, "2019-11-25T23:59:59.999-05:00"),
        "2019-11-26T05:59:59.999"
    );
    assert_eq!(
        render(&config, Directive::DateTimeNaive, "2023-04-06T23:59:59"),
        "2023-04-06T23:59:59.000"
    );
    assert_eq!(render(&summer(), Directive::TimeNaive, "10:00:00+00:00"), "12:00:00.000");
    assert_eq!(render(&config, Directive::TimeNaive, "10:00:00"), "10:00:00.000");
}

#[test]
fn test_fraction_truncated_to_milliseconds() {
    assert_eq!(
        render(&winter(), Directive::DateTimeUtc, "2023-04-06T10:00:00.9999Z"),
        "2023-04-06T10:00:00.999Z"
    );
}

#[test]
fn test_structured_inputs() {
    let config = winter();
    let date = NaiveDate::from_ymd_opt(2022, 4, 7).unwrap();
    let value = TemporalRule::new("ISODate", Directive::Date)
        .normalize(&config, date)
        .unwrap();
    assert_eq!(value.text(), "2022-04-07");
    assert_eq!(value.original(), "2022-04-07");

    let err = TemporalRule::new("ISODateTime", Directive::DateTimeUtc)
        .normalize(&config, date)
        .unwrap_err();
    assert_eq!(err.kind(), FieldErrorKind::Completeness);

    let naive = date.and_hms_milli_opt(12, 30, 0, 125).unwrap();
    let value = TemporalRule::new("ISODateTime", Directive::DateTimeUtc)
        .normalize(&config, naive)
        .unwrap();
    assert_eq!(value.text(), "2022-04-07T11:30:00.125Z");

    let zoned = FixedOffset::west_opt(5 * 3600)
        .unwrap()
        .with_ymd_and_hms(2019, 11, 25, 23, 59, 59)
        .unwrap();
    let value = TemporalRule::new("ISODateTime", Directive::DateTimeUtc)
        .normalize(&config, zoned)
        .unwrap();
    assert_eq!(value.text(), "2019-11-26T04:59:59.000Z");
}

#[test]
fn test_invalid_years() {
    for bad in ["20", "00", "invalid"] {
        assert_eq!(reject(Directive::Year, bad).kind(), FieldErrorKind::Format, "{bad}");
    }
}

#[test]
fn test_invalid_year_months() {
    for bad in ["22", "22-3", "2022-00", "2022-13", "invalid"] {
        assert_eq!(
            reject(Directive::YearMonth, bad).kind(),
            FieldErrorKind::Format,
            "{bad}"
        );
    }
    assert_eq!(
        reject(Directive::YearMonth, "2018").kind(),
        FieldErrorKind::Completeness
    );
}

#[test]
fn test_invalid_dates() {
    for bad in ["22-1-1", "2022-13-01", "2022-01-32", "invalid"] {
        assert_eq!(reject(Directive::Date, bad).kind(), FieldErrorKind::Format, "{bad}");
    }
    assert_eq!(reject(Directive::Date, "2022-04").kind(), FieldErrorKind::Completeness);
    assert_eq!(reject(Directive::Date, "10:00:00").kind(), FieldErrorKind::Completeness);
}

#[test]
fn test_time_bearing_directives_need_seconds() {
    for directive in Directive::ALL.into_iter().filter(|d| d.needs_time()) {
        assert_eq!(
            reject(directive, "2022-04-07").kind(),
            FieldErrorKind::Completeness,
            "{directive}"
        );
        assert_eq!(reject(directive, "invalid").kind(), FieldErrorKind::Format, "{directive}");
    }
    insta::assert_snapshot!(
        reject(Directive::TimeNaive, "2022-04-07T10:00").to_string(),
        @"Test: missing or incomplete time information in `2022-04-07T10:00`"
    );
}

#[test]
fn test_non_ascii_digits_rejected() {
    let cases = [
        (Directive::Date, "\u{662}\u{660}\u{661}\u{669}-\u{661}\u{661}-\u{662}\u{665}"),
        (Directive::Year, "\u{662}\u{660}\u{661}\u{669}"),
        (Directive::TimeNaive, "\u{661}\u{662}:30:00"),
        (Directive::Date, "2019-\u{661}\u{661}-25"),
        (Directive::DateTimeUtc, "2019-11-25T23:59:59.\u{669}\u{669}Z"),
        (Directive::DateTimeUtc, "2019-11-25T23:59:59+\u{660}\u{665}:00"),
        (Directive::Year, "\u{ff12}\u{ff10}\u{ff11}\u{ff19}"),
    ];
    for (directive, bad) in cases {
        assert_eq!(reject(directive, bad).kind(), FieldErrorKind::Format, "{bad}");
    }
}

#[test]
fn test_completeness_counts_only_ascii_digits() {
    let check = |directive, text| {
        camt_model::temporal::check_completeness("Test", directive, text)
            .map_err(|e| e.kind())
    };
    assert_eq!(
        check(Directive::Year, "\u{662}\u{660}\u{661}\u{669}"),
        Err(FieldErrorKind::Completeness)
    );
    assert_eq!(
        check(Directive::TimeNaive, "\u{661}\u{662}:30:00"),
        Err(FieldErrorKind::Completeness)
    );
    assert_eq!(check(Directive::Date, "2019-11-25"), Ok(()));
}

#[test]
fn test_oversized_components_rejected() {
    for bad in ["201900000000", "201900000000-01-01", "2019-011-01"] {
        assert_eq!(reject(Directive::Date, bad).kind(), FieldErrorKind::Format, "{bad}");
    }
    assert_eq!(
        reject(Directive::TimeNaive, "123:00:00").kind(),
        FieldErrorKind::Format
    );
    assert_eq!(
        render(&winter(), Directive::TimeNaive, "10:00:00.1234567890123456789"),
        "10:00:00.123"
    );
}

proptest! {
    #[test]
    fn prop_render_is_idempotent(
        directive in prop::sample::select(Directive::ALL.to_vec()),
        year in 1900i32..2100,
        month in 1u32..=12,
        day in 1u32..=28,
        hour in 0u32..24,
        minute in 0u32..60,
        second in 0u32..60,
        millis in 0u32..1000,
        offset in prop::option::of(-48i32..=56),
    ) {
        let zone = match offset {
            None => String::new(),
            Some(0) => "Z".to_string(),
            Some(quarters) => {
                let minutes = quarters.abs() * 15;
                let sign = if quarters < 0 { '-' } else { '+' };
                format!("{sign}{:02}:{:02}", minutes / 60, minutes % 60)
            }
        };
        let input = format!(
            "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}.{millis:03}{zone}"
        );
        let config = TemporalConfig { local: fixed(2), naive: fixed(1) };
        let rule = TemporalRule::new("Test", directive);

        let first = rule.normalize(&config, input.as_str()).unwrap().text();
        let second = rule.normalize(&config, first.as_str()).unwrap().text();
        prop_assert_eq!(first, second);
    }
}
