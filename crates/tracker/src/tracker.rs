//! Tracker core.
//!
//! Every call persists a first-party record. Pixel forwarding happens after
//! the persistence attempt and only while analytics consent is granted.
//! Failures are logged and counted, never returned.

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Handle;
use tracing::{debug, error, trace, warn};

use analytics_core::{
    is_canonical_name, AnalyticsEventRecord, EventPayload, IntegrationKind, IntegrationSetting,
    PageFacts, Result,
};
use event_store::EventSink;
use telemetry::TrackerMetrics;

use crate::attribution::AttributionResolver;
use crate::consent::ConsentStore;
use crate::context::PageContext;
use crate::debounce::Debouncer;
use crate::dispatch::{Dispatch, DispatchOutcome};
use crate::pixels::PixelRegistry;
use crate::settings::TrackerSettings;
use crate::storage::{MemoryStorage, ScopedStorage};

/// Everything a tracker depends on, injected at construction.
pub struct TrackerConfig {
    pub sink: Arc<dyn EventSink>,
    pub page: Arc<dyn PageContext>,
    /// Consent and first-touch UTM
    pub durable_storage: Arc<dyn ScopedStorage>,
    /// Session id
    pub session_storage: Arc<dyn ScopedStorage>,
    pub pixels: PixelRegistry,
    pub settings: TrackerSettings,
    pub metrics: Arc<TrackerMetrics>,
}

impl TrackerConfig {
    /// Config with in-memory storage scopes, no pixels and default settings.
    pub fn new(sink: Arc<dyn EventSink>, page: Arc<dyn PageContext>) -> Self {
        Self {
            sink,
            page,
            durable_storage: Arc::new(MemoryStorage::new()),
            session_storage: Arc::new(MemoryStorage::new()),
            pixels: PixelRegistry::new(),
            settings: TrackerSettings::default(),
            metrics: Arc::new(TrackerMetrics::new()),
        }
    }

    pub fn with_durable_storage(mut self, storage: Arc<dyn ScopedStorage>) -> Self {
        self.durable_storage = storage;
        self
    }

    pub fn with_session_storage(mut self, storage: Arc<dyn ScopedStorage>) -> Self {
        self.session_storage = storage;
        self
    }

    pub fn with_pixels(mut self, pixels: PixelRegistry) -> Self {
        self.pixels = pixels;
        self
    }

    pub fn with_settings(mut self, settings: TrackerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<TrackerMetrics>) -> Self {
        self.metrics = metrics;
        self
    }
}

struct TrackerInner {
    sink: Arc<dyn EventSink>,
    page: Arc<dyn PageContext>,
    consent: ConsentStore,
    attribution: AttributionResolver,
    pixels: RwLock<PixelRegistry>,
    settings: TrackerSettings,
    metrics: Arc<TrackerMetrics>,
    debouncer: Debouncer,
}

/// Cheaply cloneable tracker handle.
#[derive(Clone)]
pub struct Tracker {
    inner: Arc<TrackerInner>,
}

impl Tracker {
    /// Build a tracker. Fails only on invalid settings.
    pub fn new(config: TrackerConfig) -> Result<Self> {
        let settings = config.settings.validated()?;

        let attribution = AttributionResolver::new(
            config.durable_storage.clone(),
            config.session_storage,
            config.page.clone(),
            settings.breakpoints(),
        );

        Ok(Self {
            inner: Arc::new(TrackerInner {
                sink: config.sink,
                page: config.page,
                consent: ConsentStore::new(config.durable_storage),
                attribution,
                pixels: RwLock::new(config.pixels),
                debouncer: Debouncer::new(settings.debounce_window()),
                settings,
                metrics: config.metrics,
            }),
        })
    }

    pub fn consent(&self) -> &ConsentStore {
        &self.inner.consent
    }

    pub fn attribution(&self) -> &AttributionResolver {
        &self.inner.attribution
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.inner.settings
    }

    pub fn metrics(&self) -> &Arc<TrackerMetrics> {
        &self.inner.metrics
    }

    pub fn page(&self) -> &Arc<dyn PageContext> {
        &self.inner.page
    }

    /// Swap in the hooks loaded for this page.
    pub fn replace_pixels(&self, pixels: PixelRegistry) {
        *self.inner.pixels.write() = pixels;
    }

    /// Drop hooks whose integration is disabled in `settings`.
    pub fn retain_enabled_pixels(&self, settings: &[IntegrationSetting]) {
        self.inner.pixels.write().retain_enabled(settings);
    }

    pub fn present_pixels(&self) -> Vec<IntegrationKind> {
        self.inner.pixels.read().present()
    }

    /// Persist one record, then forward to pixels if consent allows.
    pub(crate) async fn track_event(&self, event_name: &str, payload: EventPayload) {
        let record = self.capture(event_name, &payload);
        self.deliver(record, payload).await;
    }

    /// Snapshot page, session and attribution into a record for `event_name`.
    fn capture(&self, event_name: &str, payload: &EventPayload) -> AnalyticsEventRecord {
        self.inner.metrics.events_tracked.inc();

        if !is_canonical_name(event_name) {
            debug!(event = %event_name, "Tracking non-canonical event name");
        }

        self.build_record(event_name, payload)
    }

    /// Persist a captured record, then forward `payload` if consent allows.
    async fn deliver(&self, record: AnalyticsEventRecord, payload: EventPayload) {
        let inner = &self.inner;
        let event_name = record.event_name.as_str();

        let start = Instant::now();
        match inner.sink.insert(&record).await {
            Ok(()) => {
                inner.metrics.records_persisted.inc();
                trace!(event = %event_name, session_id = %record.session_id, "Event persisted");
            }
            Err(e) => {
                inner.metrics.persist_failures.inc();
                error!(event = %event_name, error = %e, "Analytics tracking error");
            }
        }
        inner
            .metrics
            .persist_latency_ms
            .observe(start.elapsed().as_millis() as u64);

        if !inner.consent.is_tracking_allowed() {
            inner.metrics.pixel_forwarding_skipped.inc();
            trace!(event = %event_name, "Analytics consent absent, pixels skipped");
            return;
        }

        let pixels = inner.pixels.read().clone();
        let invoked = pixels.forward(event_name, &payload);
        inner.metrics.pixel_dispatches.inc_by(invoked as u64);
    }

    /// Fire-and-forget [`track_event`](Self::track_event).
    ///
    /// The record is captured before this returns, so navigation after the
    /// call does not change what gets persisted.
    pub(crate) fn dispatch(&self, event_name: &str, payload: EventPayload) -> Dispatch {
        let Ok(runtime) = Handle::try_current() else {
            warn!(event = %event_name, "No async runtime, tracking call dropped");
            return Dispatch::dropped();
        };

        let record = self.capture(event_name, &payload);
        let tracker = self.clone();
        Dispatch::spawned(runtime.spawn(async move {
            tracker.deliver(record, payload).await;
            DispatchOutcome::Completed
        }))
    }

    /// Debounced [`dispatch`](Self::dispatch): a burst inside the window
    /// collapses to its last call, captured when the window elapses.
    pub(crate) fn dispatch_debounced(&self, event_name: &str, payload: EventPayload) -> Dispatch {
        let tracker = self.clone();
        let name = event_name.to_string();
        let (dispatch, superseded) = self.inner.debouncer.call(async move {
            tracker.track_event(&name, payload).await;
        });

        if superseded {
            self.inner.metrics.debounce_superseded.inc();
            trace!(event = %event_name, "Debounced call superseded pending one");
        }
        dispatch
    }

    fn build_record(&self, event_name: &str, payload: &EventPayload) -> AnalyticsEventRecord {
        let inner = &self.inner;
        let page = &inner.page;

        let language = page
            .language()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| inner.settings.default_language.clone());

        let facts = PageFacts {
            page_url: page.url(),
            page_title: page.title(),
            referrer: page.referrer(),
            device_type: inner.attribution.device_type(),
            language,
        };

        AnalyticsEventRecord::build(
            event_name,
            payload,
            inner.attribution.session_id(),
            facts,
            inner.attribution.persisted_utm_params(),
        )
    }
}
