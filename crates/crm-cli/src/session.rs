//! Interactive session: a search-select field driven line by line from stdin.
//!
//! A plain line replaces the field text as if it had been typed. Lines
//! starting with `:` are widget events:
//!
//! | Line       | Event                               |
//! |------------|-------------------------------------|
//! | `:pick N`  | click suggestion `N` (1-based)      |
//! | `:clear`   | clear button                        |
//! | `:focus`   | input gains focus                   |
//! | `:blur`    | input loses focus                   |
//! | `:down`    | highlight next suggestion           |
//! | `:up`      | highlight previous suggestion       |
//! | `:enter`   | pick the highlighted suggestion     |
//! | `:esc`     | close the list                      |
//! | `:show`    | print the current field state       |
//! | `:quit`    | end the session                     |

use std::fmt::Write as _;

use anyhow::{Context, Result, bail};
use crm_lookup::LookupSource;
use crm_search_select::{
    FieldChange, FieldProps, Message, SearchSelectConfig, Snapshot, spawn_search_select,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Replace the field text.
    Type(String),
    /// Pick the suggestion at this zero-based index.
    Pick(usize),
    /// Clear the field.
    Clear,
    /// Focus the input.
    Focus,
    /// Blur the input.
    Blur,
    /// Highlight the previous suggestion.
    Up,
    /// Highlight the next suggestion.
    Down,
    /// Pick the highlighted suggestion.
    Enter,
    /// Close the list.
    Escape,
    /// Print the field state.
    Show,
    /// End the session.
    Quit,
}

impl SessionCommand {
    /// Parses one input line (without its line terminator).
    pub fn parse(line: &str) -> Result<Self> {
        let Some(command) = line.strip_prefix(':') else {
            return Ok(Self::Type(line.to_string()));
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let argument = parts.next();

        let parsed = match name {
            "pick" => {
                let position: usize = argument
                    .context(":pick needs a suggestion number")?
                    .parse()
                    .context("suggestion number must be a positive integer")?;
                if position == 0 {
                    bail!("suggestions are numbered from 1");
                }
                Self::Pick(position - 1)
            }
            "clear" => Self::Clear,
            "focus" => Self::Focus,
            "blur" => Self::Blur,
            "up" => Self::Up,
            "down" => Self::Down,
            "enter" => Self::Enter,
            "esc" => Self::Escape,
            "show" => Self::Show,
            "quit" | "q" => Self::Quit,
            other => bail!("unknown command :{other}"),
        };
        Ok(parsed)
    }

    /// The widget event for this command, if it is one.
    pub fn into_message(self) -> Option<Message> {
        match self {
            Self::Type(text) => Some(Message::InputChanged(text)),
            Self::Pick(index) => Some(Message::SuggestionPicked(index)),
            Self::Clear => Some(Message::Cleared),
            Self::Focus => Some(Message::FocusGained),
            Self::Blur => Some(Message::FocusLost),
            Self::Up => Some(Message::HighlightPrevious),
            Self::Down => Some(Message::HighlightNext),
            Self::Enter => Some(Message::ConfirmHighlighted),
            Self::Escape => Some(Message::Dismiss),
            Self::Show | Self::Quit => None,
        }
    }
}

/// Formats one `onChange` call.
pub fn format_change(change: &FieldChange) -> String {
    match &change.selected_id {
        Some(id) => format!("onChange({:?}, {id})", change.text),
        None => format!("onChange({:?}, null)", change.text),
    }
}

/// Formats the field state: input line, status and visible suggestions.
pub fn format_snapshot(snapshot: &Snapshot) -> String {
    let mut out = format!("[{}]", snapshot.text);
    if let Some(id) = &snapshot.selected_id {
        let _ = write!(out, " = {id}");
    }
    if snapshot.loading {
        out.push_str(" (searching...)");
    }
    if snapshot.resolving {
        out.push_str(" (resolving...)");
    }
    if let Some(error) = &snapshot.error {
        let _ = write!(out, " ! {error}");
    }

    for (position, row) in snapshot.visible_suggestions().iter().enumerate() {
        let marker = if row.highlighted { '>' } else { ' ' };
        let _ = write!(
            out,
            "\n {marker} {}. {} ({})",
            position + 1,
            row.candidate.name,
            row.candidate.id
        );
        if let Some(detail) = &row.candidate.detail {
            let _ = write!(out, " - {detail}");
        }
    }
    out
}

/// Runs a session until `:quit` or end of input.
pub async fn run_session<S: LookupSource>(
    source: S,
    props: FieldProps,
    config: SearchSelectConfig,
) -> Result<()> {
    let (field, task) = spawn_search_select(source, props, config, |change| {
        println!("{}", format_change(change));
    });

    let mut updates = field.subscribe();
    let printer = tokio::spawn(async move {
        println!("{}", format_snapshot(&updates.borrow_and_update()));
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            println!("{}", format_snapshot(&snapshot));
        }
    });

    info!("Session started; type to search, :quit to leave");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let command = match SessionCommand::parse(line.trim_end_matches('\r')) {
            Ok(command) => command,
            Err(error) => {
                eprintln!("error: {error:#}");
                continue;
            }
        };
        debug!(?command, "Session command");

        match command {
            SessionCommand::Quit => break,
            SessionCommand::Show => println!("{}", format_snapshot(&field.snapshot())),
            other => {
                if let Some(message) = other.into_message() {
                    field.send(message)?;
                }
            }
        }
    }

    drop(field);
    task.await.context("Search-select runtime panicked")?;
    printer.await.context("Snapshot printer panicked")?;
    Ok(())
}
