//! CLI argument definitions for `camt-fields`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "camt-fields",
    version,
    about = "Validate and normalize CAMT.053 field values",
    long_about = "Validate and normalize typed field values of CAMT.053 bank-to-customer\n\
                  statements: amounts, currency codes, business and external codes,\n\
                  identifiers, dates and times.\n\n\
                  Exit status is 0 for a valid value, 1 for an invalid value and 2 for a\n\
                  configuration error."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Normalization settings (TOML).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include input values in logs (redacted otherwise).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Round an amount to its currency's minor unit.
    Amount(AmountArgs),

    /// Validate a code against a registered code type.
    Code(CodeArgs),

    /// Normalize a date or time to a directive.
    Datetime(DatetimeArgs),

    /// Validate a value as any registered field type.
    Validate(ValidateArgs),

    /// List the registered field types.
    Types(TypesArgs),

    /// Render an amount as an XML element.
    Xml(XmlArgs),
}

#[derive(Args)]
pub struct AmountArgs {
    /// Amount magnitude, e.g. `123.456`.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,

    /// ISO 4217 currency code.
    #[arg(long = "ccy", value_name = "CCY")]
    pub currency: String,

    /// Decimal places to use instead of the currency's minor unit.
    #[arg(long = "scale", value_name = "N")]
    pub scale: Option<u32>,

    /// Remove trailing zeros after rounding.
    #[arg(long = "strip")]
    pub strip: bool,

    /// Use the 13-decimal amount type.
    #[arg(long = "thirteen")]
    pub thirteen: bool,
}

#[derive(Args)]
pub struct CodeArgs {
    /// Code field type, e.g. `CreditDebitCode`.
    #[arg(value_name = "TYPE")]
    pub field_type: String,

    /// Code to validate.
    #[arg(value_name = "VALUE")]
    pub value: String,
}

#[derive(Args)]
pub struct DatetimeArgs {
    /// Output directive, e.g. `YYYY-MM-DD` or `YYYY-MM-DDThh:mm:ss.sssZ`.
    #[arg(value_name = "DIRECTIVE")]
    pub directive: String,

    /// Date or time text.
    #[arg(value_name = "VALUE")]
    pub value: String,

    /// Process zone (`local`, `UTC` or `+hh:mm`), overriding the config.
    #[arg(long = "local", value_name = "ZONE")]
    pub local: Option<String>,

    /// Reference zone for offset-less values, overriding the config.
    #[arg(long = "naive", value_name = "ZONE")]
    pub naive: Option<String>,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Registered field type, e.g. `ISODateTime`.
    #[arg(value_name = "TYPE")]
    pub field_type: String,

    /// Raw value.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,

    /// Currency, required for amount types.
    #[arg(long = "ccy", value_name = "CCY")]
    pub currency: Option<String>,

    /// Decimal places for amount types.
    #[arg(long = "scale", value_name = "N")]
    pub scale: Option<u32>,

    /// Remove trailing zeros after rounding (amount types).
    #[arg(long = "strip")]
    pub strip: bool,
}

#[derive(Args)]
pub struct TypesArgs {
    /// Only list field types of this kind.
    #[arg(long = "kind", value_enum)]
    pub kind: Option<FieldKindArg>,
}

#[derive(Args)]
pub struct XmlArgs {
    /// Element tag, e.g. `Amt`.
    #[arg(value_name = "TAG")]
    pub tag: String,

    /// Amount magnitude.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,

    /// ISO 4217 currency code.
    #[arg(long = "ccy", value_name = "CCY")]
    pub currency: String,

    /// Amount field type.
    #[arg(
        long = "type",
        value_name = "TYPE",
        default_value = "ActiveOrHistoricCurrencyAndAmount"
    )]
    pub field_type: String,

    /// Decimal places to use instead of the type's default.
    #[arg(long = "scale", value_name = "N")]
    pub scale: Option<u32>,

    /// Remove trailing zeros after rounding.
    #[arg(long = "strip")]
    pub strip: bool,

    /// Write the currency as a lowercase `ccy` attribute.
    #[arg(long = "legacy-attribute")]
    pub legacy_attribute: bool,
}

/// Field kind filter for `types`.
#[derive(Clone, Copy, ValueEnum)]
pub enum FieldKindArg {
    Amount,
    Currency,
    Code,
    Temporal,
    Decimal,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
