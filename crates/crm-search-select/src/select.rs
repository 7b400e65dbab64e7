//! The search-select state machine.
//!
//! [`SearchSelect`] owns the transient UI state of one field and turns every
//! [`Message`] into a list of [`Effect`]s. It performs no I/O and never
//! sleeps; timers, lookups and change notifications are the runtime's job.
//!
//! # Supersession
//!
//! Every effective text change bumps `generation`. Debounce timers and
//! searches carry the generation they were started for, and results whose
//! generation is not the current one are dropped without touching the
//! suggestion list.

use crm_lookup::{Candidate, CandidateId, LookupError};
use tracing::{debug, trace, warn};

use crate::config::{RefocusPolicy, SearchSelectConfig};
use crate::field::{FieldChange, FieldProps};
use crate::message::{Effect, Message};
use crate::view::{Snapshot, SuggestionRow};

/// Whether the display text corresponds to a chosen candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The text is the label of the selected candidate; no search runs.
    Resolved,
    /// The text is free input; searches run after the debounce period.
    Unresolved,
}

/// State of one search-select field.
#[derive(Debug, Clone)]
pub struct SearchSelect {
    config: SearchSelectConfig,

    text: String,
    selected_id: Option<CandidateId>,
    resolution: Resolution,

    suggestions: Vec<Candidate>,
    highlighted: Option<usize>,
    open: bool,
    focused: bool,
    loading: bool,

    /// Latest issued search generation.
    generation: u64,
    /// Ticket of the lookup-by-id in flight.
    resolving: Option<u64>,
    next_ticket: u64,

    error: Option<String>,
    touched: bool,

    /// Value and identifier the parent passed last.
    parent_value: String,
    parent_id: Option<CandidateId>,
}

impl SearchSelect {
    /// Mounts a field with the parent's props.
    ///
    /// When only an identifier is supplied, the returned effects contain a
    /// one-shot [`Effect::Resolve`] for its display text.
    pub fn new(props: FieldProps, config: SearchSelectConfig) -> (Self, Vec<Effect>) {
        let mut field = Self {
            config,
            text: String::new(),
            selected_id: None,
            resolution: Resolution::Unresolved,
            suggestions: Vec::new(),
            highlighted: None,
            open: false,
            focused: false,
            loading: false,
            generation: 0,
            resolving: None,
            next_ticket: 0,
            error: None,
            touched: false,
            parent_value: String::new(),
            parent_id: None,
        };
        let effects = field.adopt(props);
        (field, effects)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Text in the input.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Identifier of the chosen candidate.
    pub fn selected_id(&self) -> Option<&CandidateId> {
        self.selected_id.as_ref()
    }

    /// Whether the text corresponds to a chosen candidate.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Cached suggestions from the last current-generation search.
    pub fn suggestions(&self) -> &[Candidate] {
        &self.suggestions
    }

    /// Whether the suggestion list is visible.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether a search for the current text is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Latest issued search generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Configuration in use.
    pub fn config(&self) -> &SearchSelectConfig {
        &self.config
    }

    /// Validation error to display; hidden until the field is touched.
    pub fn visible_error(&self) -> Option<&str> {
        if self.touched {
            self.error.as_deref()
        } else {
            None
        }
    }

    /// Builds the view model.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            text: self.text.clone(),
            selected_id: self.selected_id.clone(),
            suggestions: self
                .suggestions
                .iter()
                .enumerate()
                .map(|(i, candidate)| SuggestionRow {
                    candidate: candidate.clone(),
                    highlighted: self.highlighted == Some(i),
                })
                .collect(),
            open: self.open,
            loading: self.loading,
            resolving: self.resolving.is_some(),
            error: self.visible_error().map(str::to_string),
        }
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Processes one message and returns the effects to carry out, in order.
    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        trace!(?message, "search-select update");

        match message {
            Message::InputChanged(text) => self.input_changed(text),
            Message::Cleared => {
                if self.text.is_empty() && self.selected_id.is_none() {
                    self.close();
                    Vec::new()
                } else {
                    self.clear()
                }
            }
            Message::SuggestionPicked(index) => self.pick(index),
            Message::FocusGained => self.focus_gained(),
            Message::FocusLost => {
                self.focused = false;
                self.close();
                Vec::new()
            }
            Message::HighlightNext => {
                self.move_highlight(true);
                Vec::new()
            }
            Message::HighlightPrevious => {
                self.move_highlight(false);
                Vec::new()
            }
            Message::ConfirmHighlighted => match self.highlighted {
                Some(index) if self.open => self.pick(index),
                _ => Vec::new(),
            },
            Message::Dismiss => {
                self.close();
                Vec::new()
            }
            Message::PropsChanged(props) => self.props_changed(props),
            Message::Reset => self.reset(),
            Message::DebounceElapsed { generation } => self.debounce_elapsed(generation),
            Message::SearchCompleted { generation, result } => {
                self.search_completed(generation, result);
                Vec::new()
            }
            Message::ResolveCompleted { ticket, result } => {
                self.resolve_completed(ticket, result);
                Vec::new()
            }
        }
    }

    fn input_changed(&mut self, text: String) -> Vec<Effect> {
        if text == self.text {
            return Vec::new();
        }
        if text.is_empty() {
            return self.clear();
        }

        self.focused = true;
        self.text = text;
        self.selected_id = None;
        self.resolution = Resolution::Unresolved;
        self.resolving = None;
        self.highlighted = None;
        self.generation += 1;

        let mut effects = Vec::with_capacity(2);
        if self.config.accepts_query(&self.text) {
            effects.push(Effect::StartDebounce {
                generation: self.generation,
                delay: self.config.debounce(),
            });
        } else {
            self.loading = false;
            self.suggestions.clear();
            self.open = false;
            effects.push(Effect::CancelPending);
        }
        effects.push(Effect::Notify(FieldChange::edited(self.text.clone())));
        effects
    }

    fn clear(&mut self) -> Vec<Effect> {
        self.text.clear();
        self.selected_id = None;
        self.resolution = Resolution::Unresolved;
        self.resolving = None;
        self.suggestions.clear();
        self.loading = false;
        self.generation += 1;
        self.close();

        vec![Effect::CancelPending, Effect::Notify(FieldChange::cleared())]
    }

    fn pick(&mut self, index: usize) -> Vec<Effect> {
        let Some(candidate) = self.suggestions.get(index).cloned() else {
            debug!(index, "Ignoring pick outside the suggestion list");
            return Vec::new();
        };

        debug!(id = %candidate.id, "Candidate picked");

        self.text = candidate.name.clone();
        self.selected_id = Some(candidate.id.clone());
        self.resolution = Resolution::Resolved;
        self.resolving = None;
        self.suggestions.clear();
        self.loading = false;
        self.generation += 1;
        self.close();

        vec![
            Effect::CancelPending,
            Effect::Notify(FieldChange::picked(candidate.name, candidate.id)),
        ]
    }

    fn focus_gained(&mut self) -> Vec<Effect> {
        self.focused = true;

        if self.resolution == Resolution::Resolved || self.text.trim().is_empty() {
            return Vec::new();
        }

        match self.config.refocus {
            RefocusPolicy::ReuseCache => {
                self.open = !self.suggestions.is_empty();
                Vec::new()
            }
            RefocusPolicy::Requery if self.config.accepts_query(&self.text) => {
                self.generation += 1;
                self.loading = true;
                vec![Effect::Search {
                    generation: self.generation,
                    query: self.query(),
                }]
            }
            RefocusPolicy::Requery => Vec::new(),
        }
    }

    /// Adopts props only when their value or identifier is new.
    ///
    /// Props repeating the parent's last value and identifier, or echoing the
    /// field's own state, only update the validation display.
    fn props_changed(&mut self, props: FieldProps) -> Vec<Effect> {
        let repeated = props.value == self.parent_value && props.selected_id == self.parent_id;
        let echo = props.value == self.text && props.selected_id == self.selected_id;
        if repeated || echo {
            self.keep_validation(props);
            return Vec::new();
        }
        self.sync(props)
    }

    fn reset(&mut self) -> Vec<Effect> {
        let props = FieldProps::default();
        if self.text.is_empty() && self.selected_id.is_none() && self.resolving.is_none() {
            self.keep_validation(props);
            return Vec::new();
        }
        self.sync(props)
    }

    fn keep_validation(&mut self, props: FieldProps) {
        self.error = props.error;
        self.touched = props.touched;
        self.parent_value = props.value;
        self.parent_id = props.selected_id;
    }

    fn sync(&mut self, props: FieldProps) -> Vec<Effect> {
        let mut effects = vec![Effect::CancelPending];
        effects.extend(self.adopt(props));
        effects
    }

    /// Replaces the selection with the parent's props without notifying.
    fn adopt(&mut self, props: FieldProps) -> Vec<Effect> {
        self.error = props.error;
        self.touched = props.touched;
        self.parent_value.clone_from(&props.value);
        self.parent_id.clone_from(&props.selected_id);
        self.text = props.value;
        self.resolution = if props.selected_id.is_some() {
            Resolution::Resolved
        } else {
            Resolution::Unresolved
        };
        self.selected_id = props.selected_id;
        self.suggestions.clear();
        self.loading = false;
        self.resolving = None;
        self.generation += 1;
        self.close();

        match &self.selected_id {
            Some(id) if self.text.is_empty() => {
                self.next_ticket += 1;
                self.resolving = Some(self.next_ticket);
                debug!(%id, "Resolving display text for selected id");
                vec![Effect::Resolve {
                    ticket: self.next_ticket,
                    id: id.clone(),
                }]
            }
            _ => Vec::new(),
        }
    }

    fn debounce_elapsed(&mut self, generation: u64) -> Vec<Effect> {
        if generation != self.generation {
            trace!(generation, current = self.generation, "Dropping stale debounce");
            return Vec::new();
        }
        if self.resolution == Resolution::Resolved || !self.config.accepts_query(&self.text) {
            return Vec::new();
        }

        self.loading = true;
        vec![Effect::Search {
            generation,
            query: self.query(),
        }]
    }

    fn search_completed(&mut self, generation: u64, result: Result<Vec<Candidate>, LookupError>) {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "Discarding superseded search response"
            );
            return;
        }

        self.loading = false;
        self.highlighted = None;
        self.suggestions = match result {
            Ok(candidates) => candidates,
            Err(error) => {
                warn!(%error, query = %self.text, "Candidate search failed");
                Vec::new()
            }
        };
        self.open = self.focused && !self.suggestions.is_empty();
    }

    fn resolve_completed(&mut self, ticket: u64, result: Result<Candidate, LookupError>) {
        if self.resolving != Some(ticket) {
            debug!(ticket, "Discarding stale lookup-by-id response");
            return;
        }
        self.resolving = None;

        match result {
            Ok(candidate) => {
                self.text = candidate.name;
                self.resolution = Resolution::Resolved;
            }
            Err(error) => {
                self.resolution = Resolution::Unresolved;
                let id = self.selected_id.as_ref().map(ToString::to_string);
                warn!(%error, id = ?id, "Could not resolve selected id");
            }
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn query(&self) -> String {
        self.text.trim().to_string()
    }

    fn close(&mut self) {
        self.open = false;
        self.highlighted = None;
    }

    fn move_highlight(&mut self, forward: bool) {
        let len = self.suggestions.len();
        if !self.open || len == 0 {
            return;
        }
        self.highlighted = Some(match (self.highlighted, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(0), false) => len - 1,
            (Some(i), false) => i - 1,
        });
    }
}
