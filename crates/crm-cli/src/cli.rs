//! CLI argument definitions for `crm-search`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use crm_lookup::CandidateId;

#[derive(Parser)]
#[command(
    name = "crm-search",
    version,
    about = "CRM lookup - search collections and drive a search-select field",
    long_about = "Search a CRM collection, resolve records by id, or run an interactive\n\
                  search-select field fed from stdin.\n\n\
                  Settings are read from the platform config directory and can be\n\
                  overridden with the flags below."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file to use instead of the platform default.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// API root, e.g. https://crm.example.com/api.
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Collection to search, e.g. customers.
    #[arg(long = "collection", value_name = "NAME", global = true)]
    pub collection: Option<String>,

    /// Bearer token forwarded to the API.
    #[arg(long = "token", value_name = "TOKEN", global = true)]
    pub token: Option<String>,

    /// Use the built-in sample customers instead of the API.
    #[arg(long = "offline", global = true)]
    pub offline: bool,

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
    /// Search the collection once and print the candidates.
    Search(SearchArgs),

    /// Look up a single record by id.
    Resolve(ResolveArgs),

    /// Drive a search-select field from stdin.
    Session(SessionArgs),

    /// Show or initialize the settings file.
    Config(ConfigArgs),
}

#[derive(Parser)]
pub struct SearchArgs {
    /// Text to search for.
    #[arg(value_name = "TEXT")]
    pub text: String,
}

#[derive(Parser)]
pub struct ResolveArgs {
    /// Record id (numeric ids are sent as numbers).
    #[arg(value_name = "ID")]
    pub id: CandidateId,
}

#[derive(Parser)]
pub struct SessionArgs {
    /// Initial display text.
    #[arg(long = "value", value_name = "TEXT", default_value = "")]
    pub value: String,

    /// Initial selected id; resolved to its label when no value is given.
    #[arg(long = "selected-id", value_name = "ID")]
    pub selected_id: Option<CandidateId>,

    /// Quiet period before searching, in milliseconds.
    #[arg(long = "debounce-ms", value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Minimum number of characters before searching.
    #[arg(long = "min-chars", value_name = "N")]
    pub min_chars: Option<usize>,
}

#[derive(Parser)]
pub struct ConfigArgs {
    /// Write the default settings to the settings file.
    #[arg(long = "init")]
    pub init: bool,

    /// Overwrite an existing settings file with --init.
    #[arg(long = "force", requires = "init")]
    pub force: bool,
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
