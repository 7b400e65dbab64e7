//! In-memory lookup source.

use std::future::Future;
use std::time::Duration;

use crate::candidate::{Candidate, CandidateId};
use crate::error::{LookupError, Result};
use crate::source::LookupSource;

/// Lookup source backed by a fixed list of candidates.
///
/// Searching is a case-insensitive substring match on the label and the
/// secondary field. An optional latency is applied to every call so the
/// debounce and supersession paths behave as they would against a server.
#[derive(Debug, Clone, Default)]
pub struct MemoryLookup {
    candidates: Vec<Candidate>,
    latency: Option<Duration>,
}

impl MemoryLookup {
    /// Creates a source over the given candidates.
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            latency: None,
        }
    }

    /// Delays every call by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of candidates held.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the source holds no candidates.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

impl LookupSource for MemoryLookup {
    fn search(&self, text: &str) -> impl Future<Output = Result<Vec<Candidate>>> + Send {
        async move {
            self.simulate_latency().await;
            Ok(self
                .candidates
                .iter()
                .filter(|c| c.matches(text))
                .cloned()
                .collect())
        }
    }

    fn fetch_by_id(&self, id: &CandidateId) -> impl Future<Output = Result<Candidate>> + Send {
        async move {
            self.simulate_latency().await;
            self.candidates
                .iter()
                .find(|c| &c.id == id)
                .cloned()
                .ok_or_else(|| LookupError::NotFound(id.to_string()))
        }
    }
}
