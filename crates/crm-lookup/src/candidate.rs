//! Candidate records returned by the lookup service.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a candidate.
///
/// The backend uses numeric ids for most collections, but some return string
/// keys. Both forms round-trip through JSON unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandidateId {
    /// Numeric identifier (`42`).
    Number(u64),
    /// String identifier (`"cus_8f2"`).
    Text(String),
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for CandidateId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for CandidateId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CandidateId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl FromStr for CandidateId {
    type Err = Infallible;

    /// Parses canonical digits as a numeric id, anything else as a string id.
    ///
    /// Digits that do not print back unchanged (`"007"`, `"+7"`) stay strings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.parse::<u64>() {
            Ok(number) if number.to_string() == trimmed => Self::Number(number),
            _ => Self::Text(trimmed.to_string()),
        })
    }
}

/// One searchable entity returned by the lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique identifier.
    pub id: CandidateId,

    /// Display label.
    pub name: String,

    /// Secondary display field (falls back to the record's `email`).
    #[serde(default, alias = "email", skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Candidate {
    /// Creates a candidate without a secondary field.
    pub fn new(id: impl Into<CandidateId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            detail: None,
        }
    }

    /// Sets the secondary display field.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Case-insensitive match of the label or secondary field against a filter.
    ///
    /// An empty filter matches everything.
    pub fn matches(&self, filter: &str) -> bool {
        if filter.is_empty() {
            return true;
        }
        let filter = filter.to_lowercase();
        self.name.to_lowercase().contains(&filter)
            || self
                .detail
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_str() {
        assert_eq!("42".parse::<CandidateId>().unwrap(), CandidateId::Number(42));
        assert_eq!(
            " cus_8f2 ".parse::<CandidateId>().unwrap(),
            CandidateId::Text("cus_8f2".to_string())
        );
    }

    #[test]
    fn test_id_from_str_keeps_leading_zeros() {
        assert_eq!("0".parse::<CandidateId>().unwrap(), CandidateId::Number(0));
        assert_eq!(
            "007".parse::<CandidateId>().unwrap(),
            CandidateId::Text("007".to_string())
        );
        assert_eq!(
            "+7".parse::<CandidateId>().unwrap(),
            CandidateId::Text("+7".to_string())
        );
        assert_eq!(
            "007".parse::<CandidateId>().unwrap().to_string(),
            "007"
        );
    }

    #[test]
    fn test_id_display() {
        assert_eq!(CandidateId::from(7).to_string(), "7");
        assert_eq!(CandidateId::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_id_deserializes_number_or_string() {
        let n: CandidateId = serde_json::from_str("42").unwrap();
        let s: CandidateId = serde_json::from_str("\"42a\"").unwrap();
        assert_eq!(n, CandidateId::Number(42));
        assert_eq!(s, CandidateId::Text("42a".to_string()));
    }

    #[test]
    fn test_detail_falls_back_to_email() {
        let c: Candidate =
            serde_json::from_str(r#"{"id": 1, "name": "Acme Inc", "email": "ops@acme.test"}"#)
                .unwrap();
        assert_eq!(c.detail.as_deref(), Some("ops@acme.test"));

        let c: Candidate = serde_json::from_str(r#"{"id": 1, "name": "Acme Inc"}"#).unwrap();
        assert!(c.detail.is_none());
    }

    #[test]
    fn test_matches() {
        let c = Candidate::new(1, "Acme Inc").with_detail("billing@acme.test");
        assert!(c.matches(""));
        assert!(c.matches("acme"));
        assert!(c.matches("ACME"));
        assert!(c.matches("billing"));
        assert!(!c.matches("beta"));
    }
}
