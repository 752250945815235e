//! Subcommand implementations.
//!
//! Each command returns the text to print so it can be tested without a
//! process boundary.

use anyhow::{Context, Result, bail};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use tracing::{debug, info};

use camt_model::{
    AmountOptions, AmountRequest, FieldError, FieldValue, TemporalConfig, TemporalRule,
    ZoneSetting,
};
use camt_normalization::{
    FieldKind, FieldRule, FieldTypeRegistry, NormalizationConfig, NormalizationError, catalog,
};
use camt_output::{LEGACY_CURRENCY_ATTRIBUTE, ValueElement, to_xml_string};

use crate::cli::{
    AmountArgs, CodeArgs, DatetimeArgs, FieldKindArg, TypesArgs, ValidateArgs, XmlArgs,
};
use crate::logging::redact_value;

/// Exit status for a valid value.
pub const EXIT_OK: i32 = 0;
/// Exit status for a value that failed validation.
pub const EXIT_INVALID: i32 = 1;
/// Exit status for unusable settings or field-type definitions.
pub const EXIT_CONFIGURATION: i32 = 2;

/// Loaded settings and the registry built from them.
#[derive(Debug)]
pub struct Session {
    pub config: NormalizationConfig,
    pub registry: FieldTypeRegistry,
}

impl Session {
    pub fn new(config: NormalizationConfig) -> Result<Self> {
        let registry = catalog::from_config(&config).context("set up field types")?;
        Ok(Self { config, registry })
    }

    pub fn load(path: Option<&std::path::Path>) -> Result<Self> {
        let config = match path {
            Some(path) => NormalizationConfig::load_from(path)?,
            None => NormalizationConfig::default(),
        };
        Self::new(config)
    }
}

/// Map a command error to the process exit status.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    if let Some(err) = error.downcast_ref::<FieldError>() {
        return if err.is_fatal() {
            EXIT_CONFIGURATION
        } else {
            EXIT_INVALID
        };
    }
    if let Some(err) = error.downcast_ref::<NormalizationError>() {
        return if err.is_configuration() {
            EXIT_CONFIGURATION
        } else {
            EXIT_INVALID
        };
    }
    EXIT_INVALID
}

fn amount_options(scale: Option<u32>, strip: bool) -> AmountOptions {
    let options = AmountOptions::default().with_strip(strip);
    match scale {
        Some(scale) => options.with_scale(scale),
        None => options,
    }
}

fn validate_logged(
    registry: &FieldTypeRegistry,
    field_type: &str,
    input: impl Into<camt_model::FieldInput>,
    raw: &str,
) -> Result<FieldValue> {
    debug!(field = field_type, value = redact_value(raw), "validating");
    let value = registry.validate(field_type, input)?;
    info!(field = field_type, value = redact_value(&value.text()), "valid");
    Ok(value)
}

pub fn run_amount(session: &Session, args: &AmountArgs) -> Result<String> {
    let field_type = if args.thirteen {
        catalog::THIRTEEN_DECIMAL_AMOUNT
    } else {
        "ActiveOrHistoricCurrencyAndAmount"
    };
    let request = AmountRequest::new(args.value.as_str(), args.currency.as_str())
        .with_options(amount_options(args.scale, args.strip));
    let value = validate_logged(&session.registry, field_type, request, &args.value)?;
    Ok(value.to_string())
}

pub fn run_code(session: &Session, args: &CodeArgs) -> Result<String> {
    let rule = session.registry.rule(&args.field_type)?;
    if !matches!(rule.kind(), FieldKind::Code | FieldKind::Currency) {
        return Err(FieldError::configuration(
            args.field_type.as_str(),
            format!("is a {} type, not a code type", rule.kind()),
        )
        .into());
    }
    let value = validate_logged(
        &session.registry,
        &args.field_type,
        args.value.as_str(),
        &args.value,
    )?;
    Ok(value.text())
}

pub fn run_datetime(session: &Session, args: &DatetimeArgs) -> Result<String> {
    let mut config: TemporalConfig = session.config.datetime;
    if let Some(zone) = &args.local {
        config.local = zone.parse::<ZoneSetting>()?;
    }
    if let Some(zone) = &args.naive {
        config.naive = zone.parse::<ZoneSetting>()?;
    }
    let rule = TemporalRule::from_format("DateTime", &args.directive)?;
    debug!(
        directive = %rule.directive(),
        local = %config.local,
        naive = %config.naive,
        value = redact_value(&args.value),
        "normalizing"
    );
    let value = rule.normalize(&config, args.value.as_str())?;
    Ok(value.text())
}

pub fn run_validate(session: &Session, args: &ValidateArgs) -> Result<String> {
    let rule = session.registry.rule(&args.field_type)?;
    let value = match rule {
        FieldRule::Amount(_) => {
            let Some(currency) = &args.currency else {
                bail!("{} is an amount type and needs --ccy", args.field_type);
            };
            let request = AmountRequest::new(args.value.as_str(), currency.as_str())
                .with_options(amount_options(args.scale, args.strip));
            validate_logged(&session.registry, &args.field_type, request, &args.value)?
        }
        _ => validate_logged(
            &session.registry,
            &args.field_type,
            args.value.as_str(),
            &args.value,
        )?,
    };
    Ok(value.to_string())
}

pub fn run_types(session: &Session, args: &TypesArgs) -> String {
    let wanted = args.kind.map(|kind| match kind {
        FieldKindArg::Amount => FieldKind::Amount,
        FieldKindArg::Currency => FieldKind::Currency,
        FieldKindArg::Code => FieldKind::Code,
        FieldKindArg::Temporal => FieldKind::Temporal,
        FieldKindArg::Decimal => FieldKind::Decimal,
    });

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field type"),
        header_cell("Kind"),
        header_cell("Rule"),
    ]);
    apply_table_style(&mut table);
    for (name, rule) in session.registry.iter() {
        if wanted.is_some_and(|kind| kind != rule.kind()) {
            continue;
        }
        table.add_row(vec![
            Cell::new(name),
            Cell::new(rule.kind()),
            Cell::new(rule.describe()),
        ]);
    }
    table.to_string()
}

pub fn run_xml(session: &Session, args: &XmlArgs) -> Result<String> {
    let request = AmountRequest::new(args.value.as_str(), args.currency.as_str())
        .with_options(amount_options(args.scale, args.strip));
    let value = validate_logged(&session.registry, &args.field_type, request, &args.value)?;
    let mut element = ValueElement::new(&args.tag, &value);
    if args.legacy_attribute {
        element = element.with_currency_attribute(LEGACY_CURRENCY_ATTRIBUTE);
    }
    to_xml_string(&element).context("render XML")
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let invalid = anyhow::Error::from(FieldError::InvalidType {
            field: "CreditDebitCode".to_string(),
            expected: "text",
            actual: "integer",
        });
        assert_eq!(exit_code(&invalid), EXIT_INVALID);

        let fatal = anyhow::Error::from(FieldError::configuration("X", "broken"))
            .context("set up field types");
        assert_eq!(exit_code(&fatal), EXIT_CONFIGURATION);

        let wrapped = anyhow::Error::from(NormalizationError::Field(FieldError::configuration(
            "X", "broken",
        )));
        assert_eq!(exit_code(&wrapped), EXIT_CONFIGURATION);
    }

    #[test]
    fn test_amount_options() {
        assert_eq!(amount_options(None, false), AmountOptions::default());
        assert_eq!(
            amount_options(Some(4), true),
            AmountOptions::default().with_scale(4).with_strip(true)
        );
    }
}
