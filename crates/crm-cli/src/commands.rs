use anyhow::{Context, Result, bail};
use tracing::{Instrument, info, info_span};

use crm_cli::session::run_session;
use crm_cli::settings::Settings;
use crm_cli::source::CliSource;
use crm_lookup::LookupSource;
use crm_search_select::FieldProps;

use crate::cli::{ConfigArgs, ResolveArgs, SearchArgs, SessionArgs};
use crate::table::{candidate_table, key_value_table};

const REDACTED: &str = "[REDACTED]";

pub async fn run_search(source: &CliSource, args: &SearchArgs) -> Result<()> {
    let candidates = source
        .search(args.text.trim())
        .instrument(info_span!("search", text = %args.text))
        .await
        .with_context(|| format!("search for {:?} failed", args.text))?;
    info!(count = candidates.len(), "Search finished");

    if candidates.is_empty() {
        println!("No candidates match {:?}.", args.text);
    } else {
        println!("{}", candidate_table(&candidates));
    }
    Ok(())
}

pub async fn run_resolve(source: &CliSource, args: &ResolveArgs) -> Result<()> {
    let candidate = source
        .fetch_by_id(&args.id)
        .await
        .with_context(|| format!("lookup of id {} failed", args.id))?;
    println!("{}", candidate_table(std::slice::from_ref(&candidate)));
    Ok(())
}

pub async fn run_session_command(
    source: CliSource,
    settings: &Settings,
    args: SessionArgs,
) -> Result<()> {
    info!(source = %source.describe(), "Starting search-select session");
    let props = FieldProps {
        value: args.value,
        selected_id: args.selected_id,
        ..Default::default()
    };
    run_session(source, props, settings.search.clone()).await
}

pub fn run_config(path: &std::path::Path, settings: &Settings, args: &ConfigArgs) -> Result<()> {
    if args.init {
        if path.exists() && !args.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                path.display()
            );
        }
        Settings::default().save_to(path)?;
        println!("Wrote default settings to {}", path.display());
        return Ok(());
    }

    let status = if path.exists() { "found" } else { "not found, using defaults" };
    let endpoint = settings
        .lookup
        .collection_url()
        .map_or_else(|error| format!("invalid: {error}"), |url| url.to_string());
    let rows = [
        ("File", format!("{} ({status})", path.display())),
        ("Endpoint", endpoint),
        ("Debounce", format!("{} ms", settings.search.debounce_ms)),
        ("Min. characters", settings.search.min_query_len.to_string()),
        ("On refocus", settings.search.refocus.to_string()),
    ];
    println!("{}", key_value_table(&rows));
    println!();
    let mut shown = settings.clone();
    if shown.lookup.auth_token.is_some() {
        shown.lookup.auth_token = Some(REDACTED.to_string());
    }
    print!("{}", shown.to_toml().context("render settings")?);
    Ok(())
}
