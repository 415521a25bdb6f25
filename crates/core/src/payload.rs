//! Event payload types.
//!
//! A payload is plain data: string keys mapped to JSON values. Typed
//! families below serialize into an [`EventPayload`] with `None` fields
//! omitted, matching what the first-party store and pixels receive.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::taxonomy::EventCategory;

/// Free-form payload handed to the tracker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventPayload(Map<String, Value>);

impl EventPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a payload from any serializable struct.
    ///
    /// Values that do not serialize to a JSON object yield an empty payload.
    pub fn from_serialize<T: Serialize>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(Value::Object(map)) => Self(map),
            _ => Self::default(),
        }
    }

    /// Insert a key, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy of this payload with the derived category attached.
    ///
    /// The derived value always wins over a caller-supplied `category`.
    pub fn with_category(&self, category: EventCategory) -> Self {
        let mut merged = self.0.clone();
        merged.insert("category".into(), Value::String(category.as_str().into()));
        Self(merged)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for EventPayload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Fields shared by every payload family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseEventPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<EventCategory>,
}

/// Property and project events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyEventPayload {
    #[serde(flatten)]
    pub base: BaseEventPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_location: Option<String>,
}

/// Search and filter events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchEventPayload {
    #[serde(flatten)]
    pub base: BaseEventPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_count: Option<u64>,
}

/// Lead capture events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadEventPayload {
    #[serde(flatten)]
    pub base: BaseEventPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_type: Option<String>,
}

/// Scroll depth signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollEventPayload {
    #[serde(flatten)]
    pub base: BaseEventPayload,
    pub depth_percent: f64,
}

/// Call-to-action clicks, also reused by contact, share and favorite clicks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CtaEventPayload {
    #[serde(flatten)]
    pub base: BaseEventPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

/// Login and logout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthEventPayload {
    #[serde(flatten)]
    pub base: BaseEventPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

/// Back-office moderation and assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminEventPayload {
    #[serde(flatten)]
    pub base: BaseEventPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_detail: Option<String>,
}

/// Property finder wizard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinderEventPayload {
    #[serde(flatten)]
    pub base: BaseEventPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Map<String, Value>>,
}

macro_rules! impl_into_payload {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for EventPayload {
                fn from(value: $ty) -> Self {
                    EventPayload::from_serialize(&value)
                }
            }
        )+
    };
}

impl_into_payload!(
    BaseEventPayload,
    PropertyEventPayload,
    SearchEventPayload,
    LeadEventPayload,
    ScrollEventPayload,
    CtaEventPayload,
    AuthEventPayload,
    AdminEventPayload,
    FinderEventPayload,
);
