//! Test fixtures.

use serde_json::{json, Map, Value};

use analytics_core::{
    AnalyticsEventRecord, DeviceType, EventPayload, IntegrationKind, IntegrationSetting,
    PageFacts, UtmParams,
};

/// Landing page carrying a full campaign.
pub const CAMPAIGN_LANDING_URL: &str = "https://estates.example/?utm_source=google&utm_medium=cpc&utm_campaign=summer_sale";

pub const PROPERTY_URL: &str = "https://estates.example/properties/marina-villa-12";

/// Internal navigation carrying a different campaign.
pub const SECOND_CAMPAIGN_URL: &str = "https://estates.example/projects?utm_source=facebook&utm_campaign=winter";

/// Stored consent value.
pub fn consent_json(analytics: bool, marketing: bool) -> String {
    json!({
        "analytics": analytics,
        "marketing": marketing,
        "functional": true,
        "timestamp": 1_700_000_000_000_i64,
    })
    .to_string()
}

/// A settings row for `kind`.
pub fn setting(kind: IntegrationKind, value: Option<&str>, enabled: bool) -> IntegrationSetting {
    IntegrationSetting {
        id: None,
        key: kind.setting_key().to_string(),
        value: value.map(str::to_string),
        enabled,
    }
}

/// One enabled row per integration.
pub fn all_settings_enabled() -> Vec<IntegrationSetting> {
    IntegrationKind::ALL
        .iter()
        .map(|kind| setting(*kind, Some("ID-123"), true))
        .collect()
}

pub fn search_filters() -> Map<String, Value> {
    let mut filters = Map::new();
    filters.insert("bedrooms".into(), json!(3));
    filters.insert("community".into(), json!("Dubai Marina"));
    filters.insert("max_price".into(), json!(2_500_000));
    filters
}

/// A record as the tracker would build it.
pub fn record(event_name: &str) -> AnalyticsEventRecord {
    AnalyticsEventRecord::build(
        event_name,
        &EventPayload::new().with("property_id", "marina-villa-12"),
        "session-test".to_string(),
        PageFacts {
            page_url: PROPERTY_URL.to_string(),
            page_title: "Marina Villa".to_string(),
            referrer: None,
            device_type: DeviceType::Desktop,
            language: "en".to_string(),
        },
        UtmParams::from_query("utm_source=google"),
    )
}
