//! Device classification and UTM campaign parameters.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::form_urlencoded;

use crate::limits::{DESKTOP_BREAKPOINT_PX, MOBILE_BREAKPOINT_PX};

/// Device class derived from viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }

    /// Classify a viewport width with the default breakpoints.
    pub fn from_width(width: u32) -> Self {
        Breakpoints::default().classify(width)
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Viewport breakpoints separating mobile, tablet and desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoints {
    /// Widths below this are mobile
    pub mobile: u32,
    /// Widths at or above this are desktop
    pub desktop: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile: MOBILE_BREAKPOINT_PX,
            desktop: DESKTOP_BREAKPOINT_PX,
        }
    }
}

impl Breakpoints {
    pub fn classify(&self, width: u32) -> DeviceType {
        if width < self.mobile {
            DeviceType::Mobile
        } else if width < self.desktop {
            DeviceType::Tablet
        } else {
            DeviceType::Desktop
        }
    }
}

/// The five canonical UTM query keys.
pub const UTM_KEYS: [&str; 5] = [
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
];

/// Campaign parameters. Absent keys stay `None` and are omitted when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtmParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_campaign: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_content: Option<String>,
}

impl UtmParams {
    /// Parse a query string (with or without the leading `?`).
    ///
    /// Only keys carrying a non-empty value are kept; the first occurrence
    /// of a repeated key wins.
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            let slot = match &*key {
                "utm_source" => &mut params.utm_source,
                "utm_medium" => &mut params.utm_medium,
                "utm_campaign" => &mut params.utm_campaign,
                "utm_term" => &mut params.utm_term,
                "utm_content" => &mut params.utm_content,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        params
    }

    /// True when no key carries a value.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of keys present.
    pub fn len(&self) -> usize {
        [
            &self.utm_source,
            &self.utm_medium,
            &self.utm_campaign,
            &self.utm_term,
            &self.utm_content,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count()
    }
}
