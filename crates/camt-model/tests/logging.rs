//! Rejection logs name the field, never the rejected value.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use camt_model::temporal::{Directive, TemporalConfig, TemporalRule, ZoneSetting};
use camt_model::{CurrencyCode, DecimalRule};
use tracing::level_filters::LevelFilter;

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn captured(run: impl FnOnce()) -> String {
    let buffer = Buffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, run);
    String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap()
}

#[test]
fn test_rejections_do_not_log_values() {
    let output = captured(|| {
        DecimalRule::percentage_rate("PercentageRate")
            .validate("123.4567")
            .unwrap_err();
        TemporalRule::new("ISODate", Directive::Date)
            .normalize(&TemporalConfig::uniform(ZoneSetting::Utc), "7777-77")
            .unwrap_err();
        CurrencyCode::for_field("ActiveCurrencyCode", "QQ9").unwrap_err();
    });

    assert!(output.contains("decimal outside bounds"), "{output}");
    assert!(output.contains("PercentageRate"), "{output}");
    for value in ["123.4567", "7777-77", "QQ9"] {
        assert!(!output.contains(value), "{value} leaked: {output}");
    }
}
