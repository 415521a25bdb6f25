//! The persisted analytics row.

use serde::{Deserialize, Serialize};

use crate::attribution::{DeviceType, UtmParams};
use crate::payload::EventPayload;
use crate::taxonomy::derive_category;

/// One row of the append-only events table.
///
/// Every UTM column is always present; absent parameters serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEventRecord {
    pub event_name: String,
    /// Caller payload merged with the derived `category`
    pub event_data: EventPayload,
    pub session_id: String,
    pub page_url: String,
    pub page_title: String,
    pub referrer: Option<String>,
    pub device_type: DeviceType,
    pub language: String,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_term: Option<String>,
    pub utm_content: Option<String>,
}

/// Page-level facts captured at tracking time.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFacts {
    pub page_url: String,
    pub page_title: String,
    pub referrer: Option<String>,
    pub device_type: DeviceType,
    pub language: String,
}

impl AnalyticsEventRecord {
    /// Assemble a record, deriving the category from the event name.
    pub fn build(
        event_name: &str,
        payload: &EventPayload,
        session_id: String,
        page: PageFacts,
        utm: UtmParams,
    ) -> Self {
        Self {
            event_name: event_name.to_string(),
            event_data: payload.with_category(derive_category(event_name)),
            session_id,
            page_url: page.page_url,
            page_title: page.page_title,
            // Empty referrer means direct navigation
            referrer: page.referrer.filter(|r| !r.is_empty()),
            device_type: page.device_type,
            language: page.language,
            utm_source: utm.utm_source,
            utm_medium: utm.utm_medium,
            utm_campaign: utm.utm_campaign,
            utm_term: utm.utm_term,
            utm_content: utm.utm_content,
        }
    }
}
