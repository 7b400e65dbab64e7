//! Debounced search-and-select form field.
//!
//! A search-select field lets the user type free text, searches a remote
//! collection after a short quiet period, shows the matching candidates and
//! commits the chosen one as a `(display text, identifier)` pair to the
//! parent form.
//!
//! # Architecture
//!
//! The crate is split in two layers:
//!
//! - [`SearchSelect`] - a pure state machine. Each [`Message`] produces a
//!   list of [`Effect`]s; nothing in it sleeps or performs I/O.
//! - [`spawn_search_select`] - a tokio runtime that feeds messages into the
//!   state machine, carries out its effects against a
//!   [`LookupSource`](crm_lookup::LookupSource) and publishes [`Snapshot`]s.
//!
//! Only the most recently issued search may populate the suggestion list.
//! Older searches are cancelled, and any result that still arrives late is
//! discarded by its generation number.
//!
//! # Example
//!
//! ```no_run
//! use crm_lookup::{Candidate, MemoryLookup};
//! use crm_search_select::{FieldProps, SearchSelectConfig, spawn_search_select};
//!
//! # async fn demo() -> Result<(), crm_search_select::Closed> {
//! let source = MemoryLookup::new(vec![Candidate::new(42, "Acme Inc")]);
//! let (mut field, _task) = spawn_search_select(
//!     source,
//!     FieldProps::default(),
//!     SearchSelectConfig::default(),
//!     |change| println!("{change:?}"),
//! );
//!
//! field.input("Acme")?;
//! field.wait_for(|snapshot| snapshot.open).await?;
//! field.pick(0)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod field;
pub mod message;
pub mod runtime;
pub mod select;
pub mod view;

pub use config::{RefocusPolicy, SearchSelectConfig};
pub use error::Closed;
pub use field::{FieldChange, FieldProps};
pub use message::{Effect, Message};
pub use runtime::{SearchSelectHandle, spawn_search_select};
pub use select::{Resolution, SearchSelect};
pub use view::{Snapshot, SuggestionRow};
