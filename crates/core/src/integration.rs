//! Third-party pixel integrations and their settings rows.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

use crate::payload::EventPayload;

/// A third-party pixel integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationKind {
    Ga4,
    Gtm,
    Meta,
    TikTok,
    LinkedIn,
    Clarity,
}

impl IntegrationKind {
    /// Dispatch order.
    pub const ALL: [IntegrationKind; 6] = [
        Self::Ga4,
        Self::Gtm,
        Self::Meta,
        Self::TikTok,
        Self::LinkedIn,
        Self::Clarity,
    ];

    /// Settings-table key holding this integration's id.
    pub fn setting_key(&self) -> &'static str {
        match self {
            Self::Ga4 => "ga4_measurement_id",
            Self::Gtm => "gtm_container_id",
            Self::Meta => "meta_pixel_id",
            Self::TikTok => "tiktok_pixel_id",
            Self::LinkedIn => "linkedin_partner_id",
            Self::Clarity => "clarity_project_id",
        }
    }

    pub fn from_setting_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.setting_key() == key)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Ga4 => "Google Analytics 4",
            Self::Gtm => "Google Tag Manager",
            Self::Meta => "Meta Pixel",
            Self::TikTok => "TikTok Pixel",
            Self::LinkedIn => "LinkedIn Insight Tag",
            Self::Clarity => "Microsoft Clarity",
        }
    }

    /// The call this vendor's SDK expects for a custom event.
    pub fn command(&self, event_name: &str, payload: &EventPayload) -> PixelCall {
        let data = payload.clone().into_value();
        let (function, args) = match self {
            Self::Ga4 => ("gtag", vec![json!("event"), json!(event_name), data]),
            Self::Meta => ("fbq", vec![json!("trackCustom"), json!(event_name), data]),
            Self::TikTok => ("ttq.track", vec![json!(event_name), data]),
            Self::Gtm => {
                let mut entry = payload.as_map().clone();
                entry.insert("event".into(), json!(event_name));
                ("dataLayer.push", vec![Value::Object(entry)])
            }
            Self::Clarity => ("clarity", vec![json!("event"), json!(event_name)]),
            Self::LinkedIn => ("lintrk", vec![json!("track"), json!({ "event_name": event_name })]),
        };

        PixelCall {
            integration: *self,
            function,
            args,
        }
    }
}

impl fmt::Display for IntegrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A single invocation of a vendor's global tracking function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PixelCall {
    pub integration: IntegrationKind,
    /// Global callable, e.g. `gtag` or `ttq.track`
    pub function: &'static str,
    pub args: Vec<Value>,
}

/// One row of the integration settings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationSetting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub key: String,
    pub value: Option<String>,
    pub enabled: bool,
}

impl IntegrationSetting {
    pub fn kind(&self) -> Option<IntegrationKind> {
        IntegrationKind::from_setting_key(&self.key)
    }

    /// Enabled with a non-blank id.
    pub fn is_active(&self) -> bool {
        self.enabled
            && self
                .value
                .as_deref()
                .map(|v| !v.trim().is_empty())
                .unwrap_or(false)
    }
}
