//! Event taxonomy: four categories and the stable event-name catalogue.
//!
//! Names follow `<category>.<noun>_<verb>` in snake_case. The category of a
//! tracked event is always derived from the name string itself, so names
//! that never appear in [`AnalyticsEvent`] still resolve deterministically.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Shape of a canonical event name.
static CANONICAL_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(click|view|action|system)\.[a-z0-9]+(_[a-z0-9]+)*$")
        .expect("invalid event name pattern")
});

/// Event category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    /// User taps or clicks a UI element
    Click,
    /// User sees a page or entity
    View,
    /// User completes a business workflow step
    Action,
    /// Automated or lifecycle events
    System,
}

impl EventCategory {
    /// All categories, in catalogue order.
    pub const ALL: [EventCategory; 4] = [Self::Click, Self::View, Self::Action, Self::System];

    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::View => "view",
            Self::Action => "action",
            Self::System => "system",
        }
    }

    /// Parses a category prefix; `None` for anything outside the fixed set.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "click" => Some(Self::Click),
            "view" => Some(Self::View),
            "action" => Some(Self::Action),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the category from a dot-prefixed event name.
///
/// `"click.whatsapp"` is `Click`; names without a recognised prefix
/// (including legacy bare names like `"whatsapp_click"`) fall back to `Action`.
pub fn derive_category(event_name: &str) -> EventCategory {
    let prefix = event_name.split('.').next().unwrap_or_default();
    EventCategory::from_prefix(prefix).unwrap_or(EventCategory::Action)
}

/// Whether the name matches the canonical `<category>.<snake_case>` shape.
pub fn is_canonical_name(event_name: &str) -> bool {
    CANONICAL_NAME_REGEX.is_match(event_name)
}

/// Stable catalogue of tracked events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalyticsEvent {
    // View
    PageView,
    PropertyView,
    ProjectView,
    CompareView,

    // Click
    WhatsAppClick,
    PhoneClick,
    CtaClick,
    ShareClick,
    FavoriteClick,
    BrochureClick,
    CompareAdd,
    CompareRemove,

    // Action
    Search,
    FilterApply,
    LeadSubmit,
    ContactSubmit,
    LoginSuccess,
    LoginFail,
    Logout,
    ResaleRequest,
    AdminApprove,
    AdminReject,
    LeadAssign,
    PropertyFinderStart,
    PropertyFinderStep,
    PropertyFinderComplete,

    // System
    SessionStart,
    SessionEnd,
    ScrollDepth,
    TimeOnPage,
    ConsentGranted,
    ConsentDeclined,
}

impl AnalyticsEvent {
    /// Every catalogued event.
    pub const ALL: [AnalyticsEvent; 32] = [
        Self::PageView,
        Self::PropertyView,
        Self::ProjectView,
        Self::CompareView,
        Self::WhatsAppClick,
        Self::PhoneClick,
        Self::CtaClick,
        Self::ShareClick,
        Self::FavoriteClick,
        Self::BrochureClick,
        Self::CompareAdd,
        Self::CompareRemove,
        Self::Search,
        Self::FilterApply,
        Self::LeadSubmit,
        Self::ContactSubmit,
        Self::LoginSuccess,
        Self::LoginFail,
        Self::Logout,
        Self::ResaleRequest,
        Self::AdminApprove,
        Self::AdminReject,
        Self::LeadAssign,
        Self::PropertyFinderStart,
        Self::PropertyFinderStep,
        Self::PropertyFinderComplete,
        Self::SessionStart,
        Self::SessionEnd,
        Self::ScrollDepth,
        Self::TimeOnPage,
        Self::ConsentGranted,
        Self::ConsentDeclined,
    ];

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PageView => "view.page",
            Self::PropertyView => "view.property",
            Self::ProjectView => "view.project",
            Self::CompareView => "view.compare",
            Self::WhatsAppClick => "click.whatsapp",
            Self::PhoneClick => "click.phone",
            Self::CtaClick => "click.cta",
            Self::ShareClick => "click.share",
            Self::FavoriteClick => "click.favorite",
            Self::BrochureClick => "click.brochure",
            Self::CompareAdd => "click.compare_add",
            Self::CompareRemove => "click.compare_remove",
            Self::Search => "action.search",
            Self::FilterApply => "action.filter_apply",
            Self::LeadSubmit => "action.lead_submit",
            Self::ContactSubmit => "action.contact_submit",
            Self::LoginSuccess => "action.login_success",
            Self::LoginFail => "action.login_fail",
            Self::Logout => "action.logout",
            Self::ResaleRequest => "action.resale_request",
            Self::AdminApprove => "action.admin_approve",
            Self::AdminReject => "action.admin_reject",
            Self::LeadAssign => "action.lead_assign",
            Self::PropertyFinderStart => "action.property_finder_start",
            Self::PropertyFinderStep => "action.property_finder_step",
            Self::PropertyFinderComplete => "action.property_finder_complete",
            Self::SessionStart => "system.session_start",
            Self::SessionEnd => "system.session_end",
            Self::ScrollDepth => "system.scroll_depth",
            Self::TimeOnPage => "system.time_on_page",
            Self::ConsentGranted => "system.consent_granted",
            Self::ConsentDeclined => "system.consent_declined",
        }
    }

    /// Category derived from the wire name.
    pub fn category(&self) -> EventCategory {
        derive_category(self.as_str())
    }

    /// Look up a catalogued event by wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.as_str() == name)
    }
}

impl fmt::Display for AnalyticsEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bare event names from before the category prefix was introduced.
///
/// Older call sites and stored rows still use these. Tracked as-is they
/// derive to `action`.
pub mod legacy {
    use super::AnalyticsEvent;

    pub const WHATSAPP_CLICK: &str = "whatsapp_click";
    pub const PHONE_CLICK: &str = "phone_click";
    pub const CTA_BOOK_CONSULTATION: &str = "cta_book_consultation";
    pub const SEARCH: &str = "search";
    pub const FILTER_APPLY: &str = "filter_apply";
    pub const LEAD_SUBMIT: &str = "lead_submit";
    pub const COMPARE_ADD: &str = "compare_add";
    pub const COMPARE_REMOVE: &str = "compare_remove";
    pub const COMPARE_VIEW: &str = "compare_view";
    pub const SCROLL_DEPTH: &str = "scroll_depth";
    pub const TIME_ON_PAGE: &str = "time_on_page";
    pub const SESSION_START: &str = "session_start";
    pub const SESSION_END: &str = "session_end";
    pub const PROPERTY_FINDER_START: &str = "property_finder_start";
    pub const PROPERTY_FINDER_STEP: &str = "property_finder_step";
    pub const PROPERTY_FINDER_COMPLETE: &str = "property_finder_complete";

    /// Map a legacy bare name to its canonical event.
    pub fn canonical_name(name: &str) -> Option<AnalyticsEvent> {
        let event = match name {
            WHATSAPP_CLICK => AnalyticsEvent::WhatsAppClick,
            PHONE_CLICK => AnalyticsEvent::PhoneClick,
            CTA_BOOK_CONSULTATION => AnalyticsEvent::CtaClick,
            SEARCH => AnalyticsEvent::Search,
            FILTER_APPLY => AnalyticsEvent::FilterApply,
            LEAD_SUBMIT => AnalyticsEvent::LeadSubmit,
            COMPARE_ADD => AnalyticsEvent::CompareAdd,
            COMPARE_REMOVE => AnalyticsEvent::CompareRemove,
            COMPARE_VIEW => AnalyticsEvent::CompareView,
            SCROLL_DEPTH => AnalyticsEvent::ScrollDepth,
            TIME_ON_PAGE => AnalyticsEvent::TimeOnPage,
            SESSION_START => AnalyticsEvent::SessionStart,
            SESSION_END => AnalyticsEvent::SessionEnd,
            PROPERTY_FINDER_START => AnalyticsEvent::PropertyFinderStart,
            PROPERTY_FINDER_STEP => AnalyticsEvent::PropertyFinderStep,
            PROPERTY_FINDER_COMPLETE => AnalyticsEvent::PropertyFinderComplete,
            _ => return None,
        };
        Some(event)
    }
}
