//! Session, device and campaign attribution for tracked events.

use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use analytics_core::limits::{SESSION_STORAGE_KEY, UTM_STORAGE_KEY};
use analytics_core::{Breakpoints, DeviceType, UtmParams};

use crate::context::PageContext;
use crate::storage::ScopedStorage;

/// Resolves attribution facts from storage and the current page.
#[derive(Clone)]
pub struct AttributionResolver {
    durable: Arc<dyn ScopedStorage>,
    session: Arc<dyn ScopedStorage>,
    page: Arc<dyn PageContext>,
    breakpoints: Breakpoints,
}

impl AttributionResolver {
    pub fn new(
        durable: Arc<dyn ScopedStorage>,
        session: Arc<dyn ScopedStorage>,
        page: Arc<dyn PageContext>,
        breakpoints: Breakpoints,
    ) -> Self {
        Self {
            durable,
            session,
            page,
            breakpoints,
        }
    }

    /// Session id for the current session scope, created on first use.
    pub fn session_id(&self) -> String {
        if let Some(id) = self.session.get(SESSION_STORAGE_KEY).filter(|id| !id.is_empty()) {
            return id;
        }

        let id = Uuid::new_v4().to_string();
        self.session.set(SESSION_STORAGE_KEY, &id);
        debug!(session_id = %id, "Started analytics session");
        id
    }

    /// Drop the session id; the next call to [`session_id`](Self::session_id) mints a new one.
    pub fn reset_session(&self) {
        self.session.remove(SESSION_STORAGE_KEY);
    }

    /// Device class for the viewport width right now.
    pub fn device_type(&self) -> DeviceType {
        self.breakpoints.classify(self.page.viewport_width())
    }

    /// UTM keys present on the current URL.
    pub fn extract_utm_params(&self) -> UtmParams {
        UtmParams::from_query(&self.page.query())
    }

    /// First-touch UTM set.
    ///
    /// Once a set is stored it is returned unchanged, whatever the current
    /// URL carries, until [`clear_utm`](Self::clear_utm) is called.
    pub fn persisted_utm_params(&self) -> UtmParams {
        if let Some(raw) = self.durable.get(UTM_STORAGE_KEY) {
            match serde_json::from_str::<UtmParams>(&raw) {
                Ok(stored) if !stored.is_empty() => return stored,
                Ok(_) => {}
                Err(e) => warn!(error = %e, "Unreadable stored UTM parameters, recapturing"),
            }
        }

        let current = self.extract_utm_params();
        if current.is_empty() {
            return current;
        }

        match serde_json::to_string(&current) {
            Ok(raw) => {
                self.durable.set(UTM_STORAGE_KEY, &raw);
                debug!(utm_source = ?current.utm_source, "Captured first-touch UTM parameters");
            }
            Err(e) => warn!(error = %e, "Failed to persist UTM parameters"),
        }
        current
    }

    /// Forget the captured campaign.
    pub fn clear_utm(&self) {
        self.durable.remove(UTM_STORAGE_KEY);
    }
}
