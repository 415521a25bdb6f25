//! Consent gating: first-party always, pixels only with analytics consent.

use analytics_core::{ConsentState, IntegrationKind};
use integration_tests::{fixtures, setup::TestContext};
use serde_json::json;

#[tokio::test]
async fn test_no_consent_record_blocks_pixels() {
    let ctx = TestContext::new();

    ctx.analytics.track_whatsapp_click(None, None).await;
    ctx.analytics.track_phone_click(None, None).await;

    assert_eq!(ctx.sink.attempt_count(), 2);
    assert_eq!(ctx.hook.call_count(), 0);
    assert_eq!(ctx.metrics.pixel_forwarding_skipped.get(), 2);
}

#[tokio::test]
async fn test_analytics_denied_blocks_pixels() {
    let ctx = TestContext::new();
    ctx.set_consent(false, true);

    ctx.analytics.track_cta_click("Book", "hero").await;
    assert_eq!(ctx.sink.attempt_count(), 1);
    assert_eq!(ctx.hook.call_count(), 0);
}

#[tokio::test]
async fn test_analytics_granted_reaches_every_present_pixel() {
    let ctx = TestContext::new();
    ctx.set_consent(true, false);

    ctx.analytics.track_favorite_click("p1", true).await;

    assert_eq!(ctx.sink.attempt_count(), 1);
    assert_eq!(ctx.hook.call_count(), IntegrationKind::ALL.len());

    let ga4 = &ctx.hook.calls_for(IntegrationKind::Ga4)[0];
    assert_eq!(ga4.function, "gtag");
    assert_eq!(
        ga4.args,
        vec![
            json!("event"),
            json!("click.favorite"),
            json!({ "property_id": "p1", "button_text": "add" })
        ]
    );

    let gtm = &ctx.hook.calls_for(IntegrationKind::Gtm)[0];
    assert_eq!(gtm.function, "dataLayer.push");
    assert_eq!(
        gtm.args[0],
        json!({ "event": "click.favorite", "property_id": "p1", "button_text": "add" })
    );

    assert_eq!(ctx.hook.calls_for(IntegrationKind::Meta)[0].function, "fbq");
    assert_eq!(ctx.hook.calls_for(IntegrationKind::TikTok)[0].function, "ttq.track");
    assert_eq!(ctx.hook.calls_for(IntegrationKind::Clarity)[0].function, "clarity");
    assert_eq!(
        ctx.hook.calls_for(IntegrationKind::LinkedIn)[0].args[1],
        json!({ "event_name": "click.favorite" })
    );
}

#[tokio::test]
async fn test_missing_hooks_are_skipped() {
    let ctx = TestContext::without_pixels();
    ctx.set_consent(true, true);

    ctx.analytics.track_search("downtown", None, None).await;
    assert_eq!(ctx.sink.attempt_count(), 1);
    assert_eq!(ctx.metrics.pixel_dispatches.get(), 0);
}

#[tokio::test]
async fn test_legacy_true_string_grants() {
    let ctx = TestContext::new();
    ctx.set_raw_consent("true");

    assert!(ctx.analytics.tracker().consent().is_tracking_allowed());
    ctx.analytics.track_logout().await;
    assert_eq!(ctx.hook.call_count(), 6);
}

#[tokio::test]
async fn test_malformed_consent_fails_closed() {
    let ctx = TestContext::new();

    for raw in ["{\"analytics\":", "false", "1", "[]", "{\"analytics\":\"yes\"}"] {
        ctx.set_raw_consent(raw);
        assert!(!ctx.analytics.tracker().consent().is_tracking_allowed(), "{}", raw);
    }

    ctx.analytics.track_logout().await;
    assert_eq!(ctx.sink.attempt_count(), 1);
    assert_eq!(ctx.hook.call_count(), 0);
}

#[tokio::test]
async fn test_grant_then_decline() {
    let ctx = TestContext::new();

    ctx.analytics
        .grant_consent(ConsentState::accept_all(1_700_000_000_000))
        .await;
    // The granted event itself is forwarded
    assert_eq!(ctx.hook.call_count(), 6);

    ctx.hook.clear();
    ctx.analytics.decline_consent().await;
    assert_eq!(ctx.hook.call_count(), 0);

    assert_eq!(
        ctx.sink.event_names(),
        vec!["system.consent_granted", "system.consent_declined"]
    );

    ctx.analytics.track_property_view("p1", None, None).await;
    assert_eq!(ctx.hook.call_count(), 0);
    assert_eq!(ctx.sink.attempt_count(), 3);
}

#[tokio::test]
async fn test_pixels_narrowed_by_settings() {
    let ctx = TestContext::new();
    ctx.set_consent(true, true);

    ctx.analytics.tracker().retain_enabled_pixels(&[
        fixtures::setting(IntegrationKind::Ga4, Some("G-ABC"), true),
        fixtures::setting(IntegrationKind::Meta, Some("123"), false),
        fixtures::setting(IntegrationKind::TikTok, None, true),
    ]);

    ctx.analytics.track_brochure_click(Some("p1")).await;
    let calls = ctx.pixel_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].integration, IntegrationKind::Ga4);
}
