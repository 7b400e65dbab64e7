//! Events consumed and effects produced by the search-select state machine.

use std::time::Duration;

use crm_lookup::{Candidate, CandidateId, LookupError};

use crate::field::{FieldChange, FieldProps};

/// Every event the field reacts to.
///
/// User interactions and parent prop updates come in through the runtime
/// handle; the background variants are produced by the runtime itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // =========================================================================
    // User interaction
    // =========================================================================
    /// The text input changed to the given value.
    InputChanged(String),

    /// The clear button was pressed.
    Cleared,

    /// The suggestion at this index was clicked.
    SuggestionPicked(usize),

    /// The input gained focus.
    FocusGained,

    /// The input lost focus.
    FocusLost,

    /// Arrow down.
    HighlightNext,

    /// Arrow up.
    HighlightPrevious,

    /// Enter: pick the highlighted suggestion.
    ConfirmHighlighted,

    /// Escape: close the list without changing the value.
    Dismiss,

    // =========================================================================
    // Parent form
    // =========================================================================
    /// The parent supplied new props.
    PropsChanged(FieldProps),

    /// The parent form was reset.
    Reset,

    // =========================================================================
    // Background task results
    // =========================================================================
    /// The debounce timer for this generation fired.
    DebounceElapsed {
        /// Generation the timer was started for.
        generation: u64,
    },

    /// A search finished.
    SearchCompleted {
        /// Generation the search was issued for.
        generation: u64,
        /// Candidates or the lookup failure.
        result: Result<Vec<Candidate>, LookupError>,
    },

    /// A lookup-by-id finished.
    ResolveCompleted {
        /// Ticket the lookup was issued with.
        ticket: u64,
        /// The record or the lookup failure.
        result: Result<Candidate, LookupError>,
    },
}

/// Work requested by the state machine, carried out by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// (Re)start the debounce timer; any pending timer or search is cancelled.
    StartDebounce {
        /// Generation to report back in [`Message::DebounceElapsed`].
        generation: u64,
        /// Quiet period.
        delay: Duration,
    },

    /// Search now; any pending timer or search is cancelled.
    Search {
        /// Generation to report back in [`Message::SearchCompleted`].
        generation: u64,
        /// Trimmed query text.
        query: String,
    },

    /// Resolve the display text of a selected identifier.
    Resolve {
        /// Ticket to report back in [`Message::ResolveCompleted`].
        ticket: u64,
        /// Identifier to look up.
        id: CandidateId,
    },

    /// Cancel the pending timer or search, if any.
    CancelPending,

    /// Invoke the parent's `onChange`.
    Notify(FieldChange),
}
