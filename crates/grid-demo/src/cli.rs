//! CLI argument definitions for the grid demo.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use crate::people::PEOPLE_TABLE;

#[derive(Parser)]
#[command(
    name = "grid-demo",
    version,
    about = "Inspect and edit persisted data-grid view state",
    long_about = "Drive a persisted table session from the command line.\n\n\
                  State is stored per table under the configured storage directory \
                  and is discarded automatically when the column layout changes."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding stored table state (overrides the settings file).
    #[arg(long = "storage-dir", value_name = "DIR", global = true)]
    pub storage_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the effective state of a table and where it came from.
    Show(ShowArgs),

    /// Change a table's state the way the UI would, then persist it.
    Set(SetArgs),

    /// Delete the stored state of a table.
    Clear(TableArg),

    /// List every table with stored state.
    Keys,

    /// List the demo table's columns.
    Columns,

    /// Try a filter function against some cell values.
    Filter(FilterArgs),
}

#[derive(Parser)]
pub struct TableArg {
    /// Table name.
    #[arg(long = "table", default_value = PEOPLE_TABLE)]
    pub table: String,
}

#[derive(Parser)]
pub struct ShowArgs {
    #[command(flatten)]
    pub table: TableArg,

    /// Number of filtered rows to compute pagination for.
    #[arg(long = "rows", default_value_t = 380)]
    pub rows: usize,

    /// Print the debug snapshot (header groups and full state).
    #[arg(long = "debug")]
    pub debug: bool,
}

#[derive(Parser)]
pub struct SetArgs {
    #[command(flatten)]
    pub table: TableArg,

    /// Zero-based page index.
    #[arg(long = "page")]
    pub page: Option<usize>,

    /// Rows per page.
    #[arg(long = "page-size")]
    pub page_size: Option<usize>,

    /// Sort by a column; append `:desc` for descending. Repeatable.
    #[arg(long = "sort", value_name = "COLUMN[:desc]")]
    pub sort: Vec<String>,

    /// Filter a column, as `column=value`. Repeatable.
    #[arg(long = "filter", value_name = "COLUMN=VALUE")]
    pub filter: Vec<String>,

    /// Group by a column. Repeatable.
    #[arg(long = "group", value_name = "COLUMN")]
    pub group: Vec<String>,

    /// Hide a column. Repeatable.
    #[arg(long = "hide", value_name = "COLUMN")]
    pub hide: Vec<String>,

    /// Global filter text.
    #[arg(long = "global")]
    pub global: Option<String>,

    /// Wait for the quiet period instead of flushing immediately.
    #[arg(long = "settle")]
    pub settle: bool,
}

#[derive(Parser)]
pub struct FilterArgs {
    /// Filter function to apply.
    #[arg(value_enum)]
    pub kind: FilterKindArg,

    /// Filter value as typed into the filter box.
    pub value: String,

    /// Cell values to test.
    #[arg(required = true)]
    pub cells: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FilterKindArg {
    Fuzzy,
    Numeric,
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
