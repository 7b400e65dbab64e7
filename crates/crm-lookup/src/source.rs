//! The lookup seam used by the search-select component.

use std::future::Future;

use crate::candidate::{Candidate, CandidateId};
use crate::error::Result;

/// A remote (or local) collection that candidates can be searched in.
///
/// Futures must be `Send` so the component runtime can drive them on spawned
/// tasks.
pub trait LookupSource: Send + Sync + 'static {
    /// Returns the candidates matching `text`.
    fn search(&self, text: &str) -> impl Future<Output = Result<Vec<Candidate>>> + Send;

    /// Returns the candidate with the given identifier.
    fn fetch_by_id(&self, id: &CandidateId) -> impl Future<Output = Result<Candidate>> + Send;
}
