//! Store configuration.

use serde::{Deserialize, Serialize};

use analytics_core::limits::{EVENTS_TABLE, SETTINGS_TABLE};

/// URL value selecting the log-only store.
pub const MOCK_URL: &str = "mock";

/// REST backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend base URL (the REST API lives under `/rest/v1`)
    #[serde(default = "default_url")]
    pub url: String,
    /// Public (anon) API key sent with every request
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_events_table")]
    pub events_table: String,
    #[serde(default = "default_settings_table")]
    pub settings_table: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// How long fetched integration settings are reused
    #[serde(default = "default_settings_cache_ttl_secs")]
    pub settings_cache_ttl_secs: u64,
}

fn default_url() -> String {
    MOCK_URL.to_string()
}

fn default_events_table() -> String {
    EVENTS_TABLE.to_string()
}

fn default_settings_table() -> String {
    SETTINGS_TABLE.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_settings_cache_ttl_secs() -> u64 {
    60
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_key: String::new(),
            events_table: default_events_table(),
            settings_table: default_settings_table(),
            timeout_secs: default_timeout_secs(),
            settings_cache_ttl_secs: default_settings_cache_ttl_secs(),
        }
    }
}

impl StoreConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Whether records are only logged, never sent.
    pub fn is_mock(&self) -> bool {
        self.url.is_empty() || self.url == MOCK_URL
    }

    /// REST endpoint for a table.
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), table)
    }
}
