//! Named tracking functions, one per business event.
//!
//! This is the only tracking surface application code calls. Each function
//! fixes its event's payload shape and returns a [`Dispatch`] the caller may
//! await or drop.

use serde_json::{Map, Value};
use tracing::trace;

use analytics_core::{
    should_exclude_route, AdminEventPayload, AnalyticsEvent, AuthEventPayload, BaseEventPayload,
    ConsentState, CtaEventPayload, EventPayload, FinderEventPayload, LeadEventPayload,
    PropertyEventPayload, ScrollEventPayload, SearchEventPayload,
};

use crate::dispatch::Dispatch;
use crate::tracker::Tracker;

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

/// Convenience tracking API over a [`Tracker`].
#[derive(Clone)]
pub struct Analytics {
    tracker: Tracker,
}

impl Analytics {
    pub fn new(tracker: Tracker) -> Self {
        Self { tracker }
    }

    /// Consent, attribution and metrics of the underlying tracker.
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    fn send(&self, event: AnalyticsEvent, payload: impl Into<EventPayload>) -> Dispatch {
        self.tracker.dispatch(event.as_str(), payload.into())
    }

    // View

    /// Page view; falls back to the document title.
    pub fn track_page_view(&self, page_title: Option<&str>) -> Dispatch {
        let page_title = page_title
            .map(str::to_string)
            .unwrap_or_else(|| self.tracker.page().title());
        self.send(
            AnalyticsEvent::PageView,
            BaseEventPayload {
                page_title: Some(page_title),
                ..Default::default()
            },
        )
    }

    /// Page view on route change, unless `path` is excluded.
    ///
    /// Returns `None` when the route is excluded and nothing was tracked.
    pub fn track_route_view(&self, path: &str, page_title: Option<&str>) -> Option<Dispatch> {
        if should_exclude_route(path, &self.tracker.settings().route_exclusions) {
            trace!(path = %path, "Route excluded from page views");
            return None;
        }
        Some(self.track_page_view(page_title))
    }

    /// [`track_route_view`](Self::track_route_view) for the current page path.
    pub fn track_current_route_view(&self, page_title: Option<&str>) -> Option<Dispatch> {
        let path = self.tracker.page().path();
        self.track_route_view(&path, page_title)
    }

    pub fn track_property_view(
        &self,
        property_id: &str,
        property_title: Option<&str>,
        price: Option<f64>,
    ) -> Dispatch {
        self.send(
            AnalyticsEvent::PropertyView,
            PropertyEventPayload {
                property_id: Some(property_id.to_string()),
                property_title: owned(property_title),
                property_price: price,
                ..Default::default()
            },
        )
    }

    /// Projects share the property payload; the id goes in `property_id`.
    pub fn track_project_view(&self, project_id: &str, project_title: Option<&str>) -> Dispatch {
        self.send(
            AnalyticsEvent::ProjectView,
            PropertyEventPayload {
                property_id: Some(project_id.to_string()),
                property_title: owned(project_title),
                ..Default::default()
            },
        )
    }

    pub fn track_compare_view(&self) -> Dispatch {
        self.send(AnalyticsEvent::CompareView, EventPayload::new())
    }

    // Click

    pub fn track_whatsapp_click(&self, destination: Option<&str>, context: Option<&str>) -> Dispatch {
        self.send(
            AnalyticsEvent::WhatsAppClick,
            CtaEventPayload {
                destination: owned(destination),
                button_location: owned(context),
                ..Default::default()
            },
        )
    }

    pub fn track_phone_click(&self, destination: Option<&str>, context: Option<&str>) -> Dispatch {
        self.send(
            AnalyticsEvent::PhoneClick,
            CtaEventPayload {
                destination: owned(destination),
                button_location: owned(context),
                ..Default::default()
            },
        )
    }

    pub fn track_cta_click(&self, button_text: &str, button_location: &str) -> Dispatch {
        self.send(
            AnalyticsEvent::CtaClick,
            CtaEventPayload {
                button_text: Some(button_text.to_string()),
                button_location: Some(button_location.to_string()),
                ..Default::default()
            },
        )
    }

    /// The share method (e.g. `copy_link`) is recorded as `button_text`.
    pub fn track_share_click(&self, property_id: Option<&str>, method: Option<&str>) -> Dispatch {
        self.send(
            AnalyticsEvent::ShareClick,
            CtaEventPayload {
                property_id: owned(property_id),
                button_text: owned(method),
                ..Default::default()
            },
        )
    }

    pub fn track_favorite_click(&self, property_id: &str, is_favorite: bool) -> Dispatch {
        let action = if is_favorite { "add" } else { "remove" };
        self.send(
            AnalyticsEvent::FavoriteClick,
            CtaEventPayload {
                property_id: Some(property_id.to_string()),
                button_text: Some(action.to_string()),
                ..Default::default()
            },
        )
    }

    pub fn track_brochure_click(&self, property_id: Option<&str>) -> Dispatch {
        self.send(
            AnalyticsEvent::BrochureClick,
            CtaEventPayload {
                property_id: owned(property_id),
                ..Default::default()
            },
        )
    }

    pub fn track_compare_add(&self, property_id: &str, property_title: Option<&str>) -> Dispatch {
        self.send(
            AnalyticsEvent::CompareAdd,
            PropertyEventPayload {
                property_id: Some(property_id.to_string()),
                property_title: owned(property_title),
                ..Default::default()
            },
        )
    }

    pub fn track_compare_remove(&self, property_id: &str) -> Dispatch {
        self.send(
            AnalyticsEvent::CompareRemove,
            PropertyEventPayload {
                property_id: Some(property_id.to_string()),
                ..Default::default()
            },
        )
    }

    // Action

    pub fn track_search(
        &self,
        query: &str,
        filters: Option<Map<String, Value>>,
        results_count: Option<u64>,
    ) -> Dispatch {
        self.send(
            AnalyticsEvent::Search,
            SearchEventPayload {
                query: Some(query.to_string()),
                filters,
                results_count,
                ..Default::default()
            },
        )
    }

    pub fn track_filter_apply(&self, filters: Map<String, Value>) -> Dispatch {
        self.send(
            AnalyticsEvent::FilterApply,
            SearchEventPayload {
                filters: Some(filters),
                ..Default::default()
            },
        )
    }

    pub fn track_lead_submit(
        &self,
        source: &str,
        property_id: Option<&str>,
        form_type: Option<&str>,
    ) -> Dispatch {
        self.send(
            AnalyticsEvent::LeadSubmit,
            LeadEventPayload {
                lead_source: Some(source.to_string()),
                property_id: owned(property_id),
                form_type: owned(form_type),
                ..Default::default()
            },
        )
    }

    /// Records only whether a name and phone were given, never the values.
    pub fn track_contact_submit(&self, name: Option<&str>, has_phone: bool) -> Dispatch {
        let named = name.is_some_and(|n| !n.is_empty());
        self.send(
            AnalyticsEvent::ContactSubmit,
            CtaEventPayload {
                button_text: Some(if named { "with_name" } else { "anonymous" }.to_string()),
                button_location: Some(if has_phone { "with_phone" } else { "no_phone" }.to_string()),
                ..Default::default()
            },
        )
    }

    pub fn track_login_success(&self, method: Option<&str>) -> Dispatch {
        self.send(
            AnalyticsEvent::LoginSuccess,
            AuthEventPayload {
                method: owned(method),
                ..Default::default()
            },
        )
    }

    pub fn track_login_fail(&self, error_code: Option<&str>) -> Dispatch {
        self.send(
            AnalyticsEvent::LoginFail,
            AuthEventPayload {
                error_code: owned(error_code),
                ..Default::default()
            },
        )
    }

    pub fn track_logout(&self) -> Dispatch {
        self.send(AnalyticsEvent::Logout, EventPayload::new())
    }

    pub fn track_resale_request(&self, property_id: &str) -> Dispatch {
        self.send(
            AnalyticsEvent::ResaleRequest,
            PropertyEventPayload {
                property_id: Some(property_id.to_string()),
                ..Default::default()
            },
        )
    }

    pub fn track_admin_approve(&self, entity_type: &str, entity_id: &str) -> Dispatch {
        self.send(
            AnalyticsEvent::AdminApprove,
            AdminEventPayload {
                entity_type: Some(entity_type.to_string()),
                entity_id: Some(entity_id.to_string()),
                ..Default::default()
            },
        )
    }

    pub fn track_admin_reject(&self, entity_type: &str, entity_id: &str) -> Dispatch {
        self.send(
            AnalyticsEvent::AdminReject,
            AdminEventPayload {
                entity_type: Some(entity_type.to_string()),
                entity_id: Some(entity_id.to_string()),
                ..Default::default()
            },
        )
    }

    /// The lead is the entity; the assigned agent goes in `action_detail`.
    pub fn track_lead_assign(&self, lead_id: &str, agent_id: &str) -> Dispatch {
        self.send(
            AnalyticsEvent::LeadAssign,
            AdminEventPayload {
                entity_id: Some(lead_id.to_string()),
                action_detail: Some(agent_id.to_string()),
                ..Default::default()
            },
        )
    }

    pub fn track_property_finder_start(&self) -> Dispatch {
        self.send(AnalyticsEvent::PropertyFinderStart, EventPayload::new())
    }

    pub fn track_property_finder_step(&self, step: u32, step_name: &str) -> Dispatch {
        self.send(
            AnalyticsEvent::PropertyFinderStep,
            FinderEventPayload {
                step: Some(step),
                step_name: Some(step_name.to_string()),
                ..Default::default()
            },
        )
    }

    pub fn track_property_finder_complete(&self, preferences: Map<String, Value>) -> Dispatch {
        self.send(
            AnalyticsEvent::PropertyFinderComplete,
            FinderEventPayload {
                preferences: Some(preferences),
                ..Default::default()
            },
        )
    }

    // System

    /// Debounced: only the last depth of a rapid burst is recorded.
    pub fn track_scroll_depth(&self, depth_percent: f64) -> Dispatch {
        let payload = ScrollEventPayload {
            depth_percent,
            ..Default::default()
        };
        self.tracker
            .dispatch_debounced(AnalyticsEvent::ScrollDepth.as_str(), payload.into())
    }

    pub fn track_consent_granted(&self) -> Dispatch {
        self.send(AnalyticsEvent::ConsentGranted, EventPayload::new())
    }

    pub fn track_consent_declined(&self) -> Dispatch {
        self.send(AnalyticsEvent::ConsentDeclined, EventPayload::new())
    }

    /// Store `state` and record the decision.
    ///
    /// The event is tracked after saving, so it reaches pixels when
    /// `state` grants analytics.
    pub fn grant_consent(&self, state: ConsentState) -> Dispatch {
        self.tracker.consent().save(&state);
        self.track_consent_granted()
    }

    /// Grant every category now and record the decision.
    pub fn accept_all_consent(&self) -> Dispatch {
        self.grant_consent(ConsentState::accept_all_now())
    }

    /// Store a full rejection and record the decision.
    pub fn decline_consent(&self) -> Dispatch {
        self.tracker.consent().save(&ConsentState::reject_all_now());
        self.track_consent_declined()
    }
}
