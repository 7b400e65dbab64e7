//! Candidate lookup for the CRM search-select field.
//!
//! This crate provides the data model and the lookup sources that feed the
//! search-select component with candidates.
//!
//! # Overview
//!
//! The backend exposes every searchable collection through two endpoints:
//!
//! - `GET <collection>/?search=<text>` returns the candidates matching a query
//! - `GET <collection>/<id>` returns a single record
//!
//! Both wrap their payload in the same envelope:
//!
//! ```text
//! { "success": true, "data": { "data": <payload> } }
//! ```
//!
//! # Architecture
//!
//! - [`LookupSource`] - the seam the component depends on
//! - [`HttpLookupClient`] - reqwest implementation of the two endpoints
//! - [`MemoryLookup`] - in-memory source for offline use and tests
//! - [`envelope`] - response envelope parsing
//!
//! # Example
//!
//! ```no_run
//! use crm_lookup::{HttpLookupClient, LookupSettings, LookupSource};
//!
//! async fn find_customers() -> crm_lookup::Result<()> {
//!     let settings = LookupSettings::default();
//!     let client = HttpLookupClient::new(&settings)?;
//!
//!     for candidate in client.search("acme").await? {
//!         println!("{} - {}", candidate.id, candidate.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod candidate;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod memory;
pub mod source;

pub use candidate::{Candidate, CandidateId};
pub use client::HttpLookupClient;
pub use config::LookupSettings;
pub use error::{LookupError, Result};
pub use memory::MemoryLookup;
pub use source::LookupSource;

/// Current version of the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
