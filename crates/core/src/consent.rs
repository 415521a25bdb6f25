//! Cookie consent decision.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw value written by the first consent banner, before categories existed.
pub const LEGACY_GRANTED: &str = "true";

/// A visitor's consent decision. Always replaced wholesale, never patched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentState {
    #[serde(default)]
    pub analytics: bool,
    #[serde(default)]
    pub marketing: bool,
    #[serde(default)]
    pub functional: bool,
    /// Decision time, epoch milliseconds. 0 means no decision recorded.
    #[serde(default)]
    pub timestamp: i64,
}

impl ConsentState {
    /// The "no decision" state: nothing granted.
    pub fn undecided() -> Self {
        Self::default()
    }

    /// Every category granted at `timestamp`.
    pub fn accept_all(timestamp: i64) -> Self {
        Self {
            analytics: true,
            marketing: true,
            functional: true,
            timestamp,
        }
    }

    /// Every category declined at `timestamp`.
    pub fn reject_all(timestamp: i64) -> Self {
        Self {
            analytics: false,
            marketing: false,
            functional: false,
            timestamp,
        }
    }

    /// Every category granted now.
    pub fn accept_all_now() -> Self {
        Self::accept_all(Utc::now().timestamp_millis())
    }

    /// Every category declined now.
    pub fn reject_all_now() -> Self {
        Self::reject_all(Utc::now().timestamp_millis())
    }

    /// Whether a decision was ever recorded.
    pub fn is_decided(&self) -> bool {
        self.timestamp > 0
    }

    /// Parse a stored value.
    ///
    /// Accepts the legacy `"true"` string and a JSON object of this shape
    /// (missing flags default to `false`). Anything else yields `None`.
    pub fn from_stored(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw == LEGACY_GRANTED {
            return Some(Self {
                analytics: true,
                marketing: true,
                functional: false,
                timestamp: 0,
            });
        }

        match serde_json::from_str::<Value>(raw) {
            Ok(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }

    /// Serialized form written to storage.
    pub fn to_stored(&self) -> String {
        // A struct of bools and an integer always serializes
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
