//! `crm-search` - CRM lookup CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use crm_cli::logging::{LogConfig, LogFormat, init_logging};
use crm_cli::report::error_hint;
use crm_cli::settings::{Overrides, Settings};
use crm_cli::source::CliSource;
use tracing::debug;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod table;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_config, run_resolve, run_search, run_session_command};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            if let Some(hint) = error_hint(&error) {
                eprintln!("hint: {hint}");
            }
            1
        }
    };
    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(Settings::config_path);
    let mut overrides = Overrides {
        base_url: cli.base_url.clone(),
        collection: cli.collection.clone(),
        token: cli.token.clone(),
        ..Default::default()
    };
    if let Command::Session(args) = &cli.command {
        overrides.debounce_ms = args.debounce_ms;
        overrides.min_query_len = args.min_chars;
    }
    let settings = Settings::load_from(&config_path).with_overrides(&overrides);
    debug!(path = %config_path.display(), search = ?settings.search, "Loaded settings");

    match cli.command {
        Command::Config(args) => run_config(&config_path, &settings, &args),
        Command::Search(args) => {
            let source = CliSource::new(&settings.lookup, cli.offline)?;
            run_search(&source, &args).await
        }
        Command::Resolve(args) => {
            let source = CliSource::new(&settings.lookup, cli.offline)?;
            run_resolve(&source, &args).await
        }
        Command::Session(args) => {
            let source = CliSource::new(&settings.lookup, cli.offline)?;
            run_session_command(source, &settings, args).await
        }
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
