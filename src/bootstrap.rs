//! One-call startup for hosts that use the REST store.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use event_store::RestEventStore;
use telemetry::init_tracing_from_env;
use tracker::{Analytics, PageContext, PixelRegistry, Tracker, TrackerConfig};

use crate::settings::{load_settings, AppSettings};

/// A started analytics stack.
pub struct AnalyticsRuntime {
    pub analytics: Analytics,
    pub store: Arc<RestEventStore>,
    pub settings: AppSettings,
}

/// Load `.env` and settings, install logging, connect the store and build
/// the tracker.
///
/// Hooks in `pixels` are kept only for integrations whose settings row is
/// enabled with an id. If the settings cannot be fetched no hook is kept.
pub async fn bootstrap(page: Arc<dyn PageContext>, pixels: PixelRegistry) -> Result<AnalyticsRuntime> {
    dotenvy::dotenv().ok();
    init_tracing_from_env();

    let settings = load_settings()?;
    start(settings, page, pixels).await
}

/// [`bootstrap`] with settings already loaded. Does not touch logging.
pub async fn start(
    settings: AppSettings,
    page: Arc<dyn PageContext>,
    mut pixels: PixelRegistry,
) -> Result<AnalyticsRuntime> {
    let store = Arc::new(
        RestEventStore::new(settings.store.clone()).context("Failed to create event store client")?,
    );

    if store.check_connection().await {
        info!(url = %settings.store.url, "Event store connection: healthy");
    } else {
        warn!(url = %settings.store.url, "Event store connection: unhealthy, events may be lost");
    }

    match store.integration_settings().await {
        Ok(rows) => pixels.retain_enabled(&rows),
        Err(e) => {
            warn!(error = %e, "Failed to load integration settings, pixels disabled");
            pixels = PixelRegistry::new();
        }
    }

    let config = TrackerConfig::new(store.clone(), page)
        .with_pixels(pixels)
        .with_settings(settings.tracker.clone());
    let tracker = Tracker::new(config).context("Failed to create tracker")?;

    info!(
        pixels = ?tracker.present_pixels(),
        version = env!("CARGO_PKG_VERSION"),
        "Analytics tracker started"
    );

    Ok(AnalyticsRuntime {
        analytics: Analytics::new(tracker),
        store,
        settings,
    })
}
