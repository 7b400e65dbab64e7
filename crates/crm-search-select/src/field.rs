//! Controlled-field contract: the props a parent form passes in and the
//! change notifications it receives back.

use crm_lookup::CandidateId;

/// Inputs supplied by the parent form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldProps {
    /// Display text.
    pub value: String,
    /// Identifier of the chosen candidate, if any.
    pub selected_id: Option<CandidateId>,
    /// Validation error from the form.
    pub error: Option<String>,
    /// Whether the user has interacted with the field.
    pub touched: bool,
}

impl FieldProps {
    /// Props for a field showing `value` with no selection.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    /// Props for a field that only knows the selected identifier.
    ///
    /// The display text is resolved with a lookup-by-id on mount.
    pub fn with_selected_id(id: impl Into<CandidateId>) -> Self {
        Self {
            selected_id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Sets the validation state.
    #[must_use]
    pub fn with_validation(mut self, error: Option<String>, touched: bool) -> Self {
        self.error = error;
        self.touched = touched;
        self
    }
}

/// One `onChange` notification: the new display text and identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    /// Display text.
    pub text: String,
    /// Identifier, present only right after a pick.
    pub selected_id: Option<CandidateId>,
}

impl FieldChange {
    /// Free-text edit: the identifier is cleared.
    pub fn edited(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selected_id: None,
        }
    }

    /// A candidate was picked.
    pub fn picked(text: impl Into<String>, id: CandidateId) -> Self {
        Self {
            text: text.into(),
            selected_id: Some(id),
        }
    }

    /// The field was cleared.
    pub fn cleared() -> Self {
        Self::edited(String::new())
    }
}
