//! Annotation validator CLI.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use annot_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg, ReportFormatArg};
use annot_cli::commands::{run_schema, run_validate};
use annot_cli::logging::{LogConfig, LogFormat, init_logging};
use annot_cli::summary::print_report;
use annot_model::ReportStatus;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::from(2);
    }
    match cli.command {
        Command::Validate(args) => match run_validate(&args) {
            Ok(report) => {
                match args.format {
                    ReportFormatArg::Table => print_report(&report),
                    ReportFormatArg::Json => match serde_json::to_string_pretty(&report) {
                        Ok(json) => println!("{json}"),
                        Err(error) => {
                            eprintln!("error: {error}");
                            return ExitCode::from(2);
                        }
                    },
                }
                match report.status {
                    ReportStatus::Unreadable => ExitCode::from(2),
                    ReportStatus::Validated if report.is_valid() => ExitCode::SUCCESS,
                    ReportStatus::Validated => ExitCode::from(1),
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                ExitCode::from(2)
            }
        },
        Command::Schema(args) => match run_schema(&args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                eprintln!("error: {error:#}");
                ExitCode::from(2)
            }
        },
    }
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
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
