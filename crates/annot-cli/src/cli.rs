//! CLI argument definitions for the annotation validator.

use std::path::PathBuf;

use annot_model::ReportDuplicates;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "annot-validator",
    version,
    about = "Validate compound annotation tables",
    long_about = "Validate compound annotation tables against the annotation schema.\n\n\
                  Reads TSV, CSV, Parquet, Feather and JSON tables and reports every\n\
                  violation at once instead of stopping at the first."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a submission file.
    Validate(ValidateArgs),

    /// Show the annotation schema.
    Schema(SchemaArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Submission table (.tsv, .csv, .parquet, .feather, .json).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Validate against a schema JSON file instead of the built-in schema.
    #[arg(long = "schema", value_name = "JSON")]
    pub schema: Option<PathBuf>,

    /// How to print the report.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,

    /// Also write the failure cases as a table; the format follows the extension.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Accept columns that no schema entry describes.
    #[arg(long = "no-strict")]
    pub no_strict: bool,

    /// Which occurrences of a duplicated value to report.
    #[arg(long = "report-duplicates", value_enum)]
    pub report_duplicates: Option<ReportDuplicatesArg>,

    /// Evaluate columns on the calling thread only.
    #[arg(long = "serial")]
    pub serial: bool,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Print the schema as JSON (loadable with `validate --schema`).
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportDuplicatesArg {
    All,
    ExcludeFirst,
    ExcludeLast,
}

impl From<ReportDuplicatesArg> for ReportDuplicates {
    fn from(arg: ReportDuplicatesArg) -> Self {
        match arg {
            ReportDuplicatesArg::All => ReportDuplicates::All,
            ReportDuplicatesArg::ExcludeFirst => ReportDuplicates::ExcludeFirst,
            ReportDuplicatesArg::ExcludeLast => ReportDuplicates::ExcludeLast,
        }
    }
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
