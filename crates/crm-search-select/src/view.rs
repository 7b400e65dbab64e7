//! Read-only view model of the field.

use crm_lookup::{Candidate, CandidateId};

/// One row of the suggestion list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRow {
    /// The candidate shown in this row.
    pub candidate: Candidate,
    /// Whether keyboard navigation currently points at this row.
    pub highlighted: bool,
}

/// Everything a renderer needs to draw the field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    /// Text in the input.
    pub text: String,
    /// Identifier of the chosen candidate.
    pub selected_id: Option<CandidateId>,
    /// Cached suggestions, in service order.
    pub suggestions: Vec<SuggestionRow>,
    /// Whether the suggestion list is visible.
    pub open: bool,
    /// A search for the current text is in flight.
    pub loading: bool,
    /// A lookup-by-id for the selected identifier is in flight.
    pub resolving: bool,
    /// Validation error to display (only once the field is touched).
    pub error: Option<String>,
}

impl Snapshot {
    /// Suggestions that should be drawn right now.
    pub fn visible_suggestions(&self) -> &[SuggestionRow] {
        if self.open { &self.suggestions } else { &[] }
    }

    /// Index of the highlighted row.
    pub fn highlighted_index(&self) -> Option<usize> {
        self.suggestions.iter().position(|row| row.highlighted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: u64, name: &str, highlighted: bool) -> SuggestionRow {
        SuggestionRow {
            candidate: Candidate::new(id, name),
            highlighted,
        }
    }

    #[test]
    fn test_closed_list_hides_suggestions() {
        let snapshot = Snapshot {
            suggestions: vec![row(1, "Acme Inc", false)],
            open: false,
            ..Default::default()
        };
        assert!(snapshot.visible_suggestions().is_empty());
    }

    #[test]
    fn test_highlighted_index() {
        let snapshot = Snapshot {
            suggestions: vec![row(1, "Acme Inc", false), row(2, "Acme Logistics", true)],
            open: true,
            ..Default::default()
        };
        assert_eq!(snapshot.visible_suggestions().len(), 2);
        assert_eq!(snapshot.highlighted_index(), Some(1));
    }
}
