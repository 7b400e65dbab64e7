//! Persisted settings: lookup endpoint and field behavior.
//!
//! Settings are stored as TOML in the platform config directory. A missing
//! or unreadable file yields the defaults; command-line flags are applied on
//! top of whatever was loaded.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crm_lookup::LookupSettings;
use crm_search_select::SearchSelectConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Everything the `crm-search` binary reads from its config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Lookup endpoint.
    pub lookup: LookupSettings,

    /// Search-select behavior.
    pub search: SearchSelectConfig,
}

/// Values given on the command line that replace file settings.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--base-url`
    pub base_url: Option<String>,
    /// `--collection`
    pub collection: Option<String>,
    /// `--token`
    pub token: Option<String>,
    /// `--debounce-ms`
    pub debounce_ms: Option<u64>,
    /// `--min-chars`
    pub min_query_len: Option<usize>,
}

impl Settings {
    /// Load settings from a specific path.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(error) => {
                warn!(path = %path.display(), %error, "Ignoring invalid settings file");
                Self::default()
            }
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings to {}", path.display()))
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize settings")
    }

    /// Get the default config file path.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "CrmDashboard", "CRM")
            .map(|dirs| dirs.config_dir().join("search.toml"))
            .unwrap_or_else(|| PathBuf::from("search.toml"))
    }

    /// Apply command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(base_url) = &overrides.base_url {
            self.lookup.base_url.clone_from(base_url);
        }
        if let Some(collection) = &overrides.collection {
            self.lookup.collection.clone_from(collection);
        }
        if let Some(token) = &overrides.token {
            self.lookup.auth_token = Some(token.clone());
        }
        if let Some(debounce_ms) = overrides.debounce_ms {
            self.search.debounce_ms = debounce_ms;
        }
        if let Some(min_query_len) = overrides.min_query_len {
            self.search.min_query_len = min_query_len;
        }
        self
    }
}
