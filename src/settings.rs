//! Settings loading.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use event_store::StoreConfig;
use tracker::TrackerSettings;

/// Default settings file, without extension.
pub const SETTINGS_FILE: &str = "config/analytics";

/// Environment prefix; nested keys use `__`, e.g. `ANALYTICS_TRACKER__DEBOUNCE_WINDOW_MS`.
pub const ENV_PREFIX: &str = "ANALYTICS";

/// Complete analytics configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub tracker: TrackerSettings,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Load settings from [`SETTINGS_FILE`] and the environment.
pub fn load_settings() -> Result<AppSettings> {
    load_settings_from(SETTINGS_FILE)
}

/// Load settings: defaults, then the optional file, then environment.
pub fn load_settings_from(file: &str) -> Result<AppSettings> {
    let config = config::Config::builder()
        .add_source(config::Config::try_from(&AppSettings::default())?)
        .add_source(config::File::with_name(file).required(false))
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix(ENV_PREFIX)
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut settings: AppSettings = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Flat overrides for the values deployments set most often
    if let Ok(url) = std::env::var("ANALYTICS_STORE_URL") {
        settings.store.url = url;
    }
    if let Ok(api_key) = std::env::var("ANALYTICS_STORE_API_KEY") {
        settings.store.api_key = api_key;
    }
    if let Ok(patterns) = std::env::var("ANALYTICS_ROUTE_EXCLUSIONS") {
        settings.tracker.route_exclusions = patterns
            .split(',')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
    }

    settings.tracker = settings
        .tracker
        .validated()
        .context("Invalid tracker settings")?;

    Ok(settings)
}
