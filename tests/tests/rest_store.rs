//! REST store client against an in-process backend stub.

use std::sync::Arc;

use analytics_core::{IntegrationKind, StoreErrorCode};
use event_store::{EventSink, RestEventStore};
use integration_tests::{fixtures, stub::RestStub};
use serde_json::json;
use tracker::{Analytics, MemoryPageContext, PageSnapshot, Tracker, TrackerConfig};

#[tokio::test]
async fn test_insert_posts_row_with_api_key() {
    let stub = RestStub::start().await;
    let store = RestEventStore::new(stub.store_config("anon-key")).unwrap();

    store.insert(&fixtures::record("view.property")).await.unwrap();

    let rows = stub.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["event_name"], json!("view.property"));
    assert_eq!(rows[0]["event_data"]["category"], json!("view"));
    assert_eq!(rows[0]["utm_source"], json!("google"));
    assert_eq!(rows[0]["utm_medium"], json!(null));
    assert_eq!(stub.api_keys(), vec!["anon-key".to_string()]);
    assert!(store.is_healthy());
}

#[tokio::test]
async fn test_rejected_insert_is_coded() {
    let stub = RestStub::start().await;
    stub.fail_inserts_with(Some(400));
    let store = RestEventStore::new(stub.store_config("anon-key")).unwrap();

    let err = store.insert(&fixtures::record("view.page")).await.unwrap_err();
    assert_eq!(err.error_code(), Some(StoreErrorCode::InsertFailed.code()));
    assert!(!err.is_transient());
    assert!(store.is_healthy());

    stub.fail_inserts_with(Some(503));
    let err = store.insert(&fixtures::record("view.page")).await.unwrap_err();
    assert!(err.is_transient());
    assert!(!store.is_healthy());
}

#[tokio::test]
async fn test_check_connection() {
    let stub = RestStub::start().await;
    let store = RestEventStore::new(stub.store_config("anon-key")).unwrap();
    assert!(store.check_connection().await);
}

#[tokio::test]
async fn test_settings_are_cached_and_invalidated() {
    let stub = RestStub::with_settings(fixtures::all_settings_enabled()).await;
    let store = RestEventStore::new(stub.store_config("anon-key")).unwrap();

    assert_eq!(store.integration_settings().await.unwrap().len(), 6);
    store.integration_settings().await.unwrap();
    assert_eq!(stub.settings_reads(), 1);

    store
        .update_integration_setting("admin", "meta_pixel_id", Some("987"), false)
        .await
        .unwrap();

    let rows = store.integration_settings().await.unwrap();
    assert_eq!(stub.settings_reads(), 2);
    let meta = rows
        .iter()
        .find(|s| s.kind() == Some(IntegrationKind::Meta))
        .unwrap();
    assert_eq!(meta.value.as_deref(), Some("987"));
    assert!(!meta.enabled);
}

#[tokio::test]
async fn test_marketer_cannot_save_settings() {
    let stub = RestStub::with_settings(fixtures::all_settings_enabled()).await;
    let store = RestEventStore::new(stub.store_config("anon-key")).unwrap();

    let err = store
        .save_integration_settings("marketer", &fixtures::all_settings_enabled())
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), Some("ACCESS_002"));
    assert_eq!(stub.settings(), fixtures::all_settings_enabled());
}

#[tokio::test]
async fn test_update_unknown_key_fails() {
    let stub = RestStub::start().await;
    let store = RestEventStore::new(stub.store_config("anon-key")).unwrap();

    let err = store
        .update_integration_setting("super_admin", "unknown_key", None, false)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), Some(StoreErrorCode::UpdateFailed.code()));
}

#[tokio::test]
async fn test_tracker_over_rest_store() {
    let stub = RestStub::start().await;
    let store = Arc::new(RestEventStore::new(stub.store_config("anon-key")).unwrap());
    let page = Arc::new(MemoryPageContext::new(PageSnapshot {
        url: fixtures::CAMPAIGN_LANDING_URL.to_string(),
        title: "Home".to_string(),
        ..Default::default()
    }));

    let analytics = Analytics::new(Tracker::new(TrackerConfig::new(store, page)).unwrap());
    analytics.track_lead_submit("whatsapp", Some("p1"), None).await;

    let rows = stub.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["event_name"], json!("action.lead_submit"));
    assert_eq!(rows[0]["utm_campaign"], json!("summer_sale"));
    assert_eq!(rows[0]["language"], json!("en"));
}

#[tokio::test]
async fn test_unreachable_store_does_not_break_tracking() {
    let store = Arc::new(
        RestEventStore::new(event_store::StoreConfig::new("http://127.0.0.1:9", "anon-key")).unwrap(),
    );
    let page = Arc::new(MemoryPageContext::default());
    let tracker = Tracker::new(TrackerConfig::new(store.clone(), page)).unwrap();
    let analytics = Analytics::new(tracker);

    analytics.track_page_view(None).await;
    assert_eq!(analytics.tracker().metrics().persist_failures.get(), 1);
    assert!(!store.is_healthy());
}
