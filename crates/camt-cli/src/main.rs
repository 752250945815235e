//! `camt-fields`: validate and normalize CAMT.053 field values.

use std::io::{self, IsTerminal};

use camt_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use camt_cli::commands::{
    EXIT_CONFIGURATION, EXIT_OK, Session, exit_code, run_amount, run_code, run_datetime,
    run_types, run_validate, run_xml,
};
use camt_cli::logging::{LogConfig, LogFormat, init_logging};
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(EXIT_CONFIGURATION);
    }

    let session = match Session::load(cli.config.as_deref()) {
        Ok(session) => session,
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(EXIT_CONFIGURATION);
        }
    };

    let result = match &cli.command {
        Command::Amount(args) => run_amount(&session, args),
        Command::Code(args) => run_code(&session, args),
        Command::Datetime(args) => run_datetime(&session, args),
        Command::Validate(args) => run_validate(&session, args),
        Command::Types(args) => Ok(run_types(&session, args)),
        Command::Xml(args) => run_xml(&session, args),
    };
    let exit = match result {
        Ok(output) => {
            println!("{output}");
            EXIT_OK
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            exit_code(&error)
        }
    };
    std::process::exit(exit);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
