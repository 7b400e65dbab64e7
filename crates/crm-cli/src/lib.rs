//! CLI library components for the `crm-search` binary.

pub mod logging;
pub mod report;
pub mod session;
pub mod settings;
pub mod source;
