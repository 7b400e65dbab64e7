//! Runtime errors.

use thiserror::Error;

/// The runtime task behind a [`SearchSelectHandle`](crate::SearchSelectHandle)
/// is no longer running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("search-select runtime has stopped")]
pub struct Closed;
