//! Search-select configuration.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What happens when an unresolved field regains focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefocusPolicy {
    /// Reopen the list with the suggestions cached from the last search.
    #[default]
    ReuseCache,
    /// Issue a fresh search for the current text.
    Requery,
}

impl RefocusPolicy {
    /// Get a human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ReuseCache => "Reuse cached suggestions",
            Self::Requery => "Search again",
        }
    }
}

impl fmt::Display for RefocusPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Configuration for search-select behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSelectConfig {
    /// Debounce delay in milliseconds.
    ///
    /// After a keystroke, the field waits this long before searching.
    /// Additional keystrokes reset the timer.
    pub debounce_ms: u64,

    /// Minimum number of (trimmed) characters before a search is issued.
    pub min_query_len: usize,

    /// Behavior when the field regains focus.
    pub refocus: RefocusPolicy,
}

impl Default for SearchSelectConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_query_len: 1,
            refocus: RefocusPolicy::default(),
        }
    }
}

impl SearchSelectConfig {
    /// Debounce delay as a [`Duration`].
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Whether `text` is long enough to search for.
    ///
    /// An empty query never searches, even with a threshold of zero.
    #[must_use]
    pub fn accepts_query(&self, text: &str) -> bool {
        let len = text.trim().chars().count();
        len > 0 && len >= self.min_query_len
    }
}
