//! Debounced scroll-depth tracking under paused time.

use std::time::Duration;

use integration_tests::setup::TestContext;
use serde_json::json;
use tokio::time::sleep;
use tracker::{DispatchOutcome, TrackerSettings};

#[tokio::test(start_paused = true)]
async fn test_three_calls_in_window_dispatch_once_with_last_args() {
    let ctx = TestContext::new();

    let first = ctx.analytics.track_scroll_depth(25.0);
    sleep(Duration::from_millis(40)).await;
    let second = ctx.analytics.track_scroll_depth(50.0);
    sleep(Duration::from_millis(40)).await;
    let third = ctx.analytics.track_scroll_depth(75.0);

    assert_eq!(third.await, DispatchOutcome::Completed);
    assert_eq!(first.await, DispatchOutcome::Superseded);
    assert_eq!(second.await, DispatchOutcome::Superseded);

    assert_eq!(ctx.sink.attempt_count(), 1);
    let record = ctx.last_record();
    assert_eq!(record.event_name, "system.scroll_depth");
    assert_eq!(record.event_data.get("depth_percent"), Some(&json!(75.0)));
    assert_eq!(record.event_data.get("category"), Some(&json!("system")));
    assert_eq!(ctx.metrics.debounce_superseded.get(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_nothing_fires_before_window() {
    let ctx = TestContext::new();

    ctx.analytics.track_scroll_depth(10.0).detach();
    sleep(Duration::from_millis(299)).await;
    assert_eq!(ctx.sink.attempt_count(), 0);

    sleep(Duration::from_millis(2)).await;
    assert_eq!(ctx.sink.attempt_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_separate_bursts_each_dispatch() {
    let ctx = TestContext::new();

    ctx.analytics.track_scroll_depth(25.0).await;
    sleep(Duration::from_millis(500)).await;
    ctx.analytics.track_scroll_depth(90.0).await;

    let depths: Vec<_> = ctx
        .records()
        .iter()
        .map(|r| r.event_data.get("depth_percent").cloned())
        .collect();
    assert_eq!(depths, vec![Some(json!(25.0)), Some(json!(90.0))]);
}

#[tokio::test(start_paused = true)]
async fn test_debounce_does_not_delay_one_shot_events() {
    let ctx = TestContext::new();

    let scroll = ctx.analytics.track_scroll_depth(30.0);
    ctx.analytics.track_lead_submit("contact_form", None, None).await;
    assert_eq!(ctx.sink.event_names(), vec!["action.lead_submit"]);

    scroll.await;
    assert_eq!(ctx.sink.record_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_configured_window() {
    let ctx = TestContext::with_settings(TrackerSettings {
        debounce_window_ms: 1000,
        ..Default::default()
    });

    ctx.analytics.track_scroll_depth(10.0).detach();
    sleep(Duration::from_millis(600)).await;
    ctx.analytics.track_scroll_depth(20.0).detach();
    sleep(Duration::from_millis(600)).await;
    assert_eq!(ctx.sink.attempt_count(), 0);

    sleep(Duration::from_millis(500)).await;
    assert_eq!(ctx.sink.attempt_count(), 1);
    assert_eq!(
        ctx.last_record().event_data.get("depth_percent"),
        Some(&json!(20.0))
    );
}
