//! Configuration types for the lookup client.

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{LookupError, Result};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Default collection searched by the customer field.
pub const DEFAULT_COLLECTION: &str = "customers";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Settings for reaching one lookup collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupSettings {
    /// API root, e.g. `https://crm.example.com/api`.
    pub base_url: String,

    /// Collection path below the API root, e.g. `customers`.
    pub collection: String,

    /// Bearer token forwarded verbatim in the `Authorization` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            auth_token: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl LookupSettings {
    /// Creates settings for a collection below the given API root.
    pub fn new(base_url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            collection: collection.into(),
            ..Default::default()
        }
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Absolute URL of the collection, always ending with `/`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidConfig`] when the base URL does not parse
    /// or the collection is empty.
    pub fn collection_url(&self) -> Result<Url> {
        let collection = self.collection.trim_matches('/');
        if collection.is_empty() {
            return Err(LookupError::InvalidConfig(
                "collection must not be empty".to_string(),
            ));
        }

        let raw = format!("{}/{}/", self.base_url.trim_end_matches('/'), collection);
        Url::parse(&raw).map_err(|e| LookupError::InvalidConfig(format!("{raw}: {e}")))
    }
}
