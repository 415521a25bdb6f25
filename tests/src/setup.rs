//! Common test setup functions.

use std::sync::Arc;

use analytics_core::limits::CONSENT_STORAGE_KEY;
use analytics_core::{AnalyticsEventRecord, IntegrationKind, PixelCall};
use telemetry::{try_init_tracing, TracingConfig, TrackerMetrics};
use tracker::{
    Analytics, MemoryPageContext, MemoryStorage, PageSnapshot, ScopedStorage, Tracker,
    TrackerConfig, TrackerSettings,
};

use crate::fixtures;
use crate::mocks::{MockEventSink, RecordingHook};

/// Test context with a mock sink, in-memory storage and every pixel hooked.
///
/// This runs the production tracker:
/// - the real `Analytics` and `Tracker`
/// - `MockEventSink` implementing the same `EventSink` trait as the REST store
/// - `RecordingHook` standing in for every vendor SDK
pub struct TestContext {
    pub sink: Arc<MockEventSink>,
    pub hook: RecordingHook,
    pub durable: Arc<MemoryStorage>,
    pub session: Arc<MemoryStorage>,
    pub page: Arc<MemoryPageContext>,
    pub metrics: Arc<TrackerMetrics>,
    pub analytics: Analytics,
}

impl TestContext {
    /// Desktop visitor on a property page, all six pixels loaded.
    pub fn new() -> Self {
        Self::build(TrackerSettings::default(), &IntegrationKind::ALL)
    }

    /// Context with no pixel hooks loaded.
    pub fn without_pixels() -> Self {
        Self::build(TrackerSettings::default(), &[])
    }

    pub fn with_settings(settings: TrackerSettings) -> Self {
        Self::build(settings, &IntegrationKind::ALL)
    }

    pub fn build(settings: TrackerSettings, pixels: &[IntegrationKind]) -> Self {
        try_init_tracing(&TracingConfig::new().with_filter("warn"));

        let sink = Arc::new(MockEventSink::new());
        let hook = RecordingHook::new();
        let durable = Arc::new(MemoryStorage::new());
        let session = Arc::new(MemoryStorage::new());
        let metrics = Arc::new(TrackerMetrics::new());
        let page = Arc::new(MemoryPageContext::new(PageSnapshot {
            url: fixtures::PROPERTY_URL.to_string(),
            title: "Marina Villa".to_string(),
            referrer: None,
            language: Some("en".to_string()),
            viewport_width: 1440,
        }));

        let config = TrackerConfig::new(sink.clone(), page.clone())
            .with_durable_storage(durable.clone())
            .with_session_storage(session.clone())
            .with_pixels(hook.registry(pixels))
            .with_settings(settings)
            .with_metrics(metrics.clone());
        let tracker = Tracker::new(config).expect("Failed to create tracker");

        Self {
            sink,
            hook,
            durable,
            session,
            page,
            metrics,
            analytics: Analytics::new(tracker),
        }
    }

    /// Store a consent decision in the durable scope.
    pub fn set_consent(&self, analytics: bool, marketing: bool) {
        self.durable
            .set(CONSENT_STORAGE_KEY, &fixtures::consent_json(analytics, marketing));
    }

    /// Store a raw consent value.
    pub fn set_raw_consent(&self, raw: &str) {
        self.durable.set(CONSENT_STORAGE_KEY, raw);
    }

    /// End the browser session: the session scope is wiped.
    pub fn end_session(&self) {
        self.session.clear();
    }

    pub fn records(&self) -> Vec<AnalyticsEventRecord> {
        self.sink.captured_records()
    }

    pub fn last_record(&self) -> AnalyticsEventRecord {
        self.records()
            .pop()
            .expect("No record was persisted")
    }

    pub fn pixel_calls(&self) -> Vec<PixelCall> {
        self.hook.calls()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
