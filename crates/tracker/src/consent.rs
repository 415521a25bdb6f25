//! Consent store over the durable storage scope.

use std::sync::Arc;
use tracing::warn;

use analytics_core::limits::CONSENT_STORAGE_KEY;
use analytics_core::ConsentState;

use crate::storage::ScopedStorage;

/// Reads and overwrites the visitor's consent decision.
#[derive(Clone)]
pub struct ConsentStore {
    storage: Arc<dyn ScopedStorage>,
}

impl ConsentStore {
    pub fn new(storage: Arc<dyn ScopedStorage>) -> Self {
        Self { storage }
    }

    /// Current decision; undecided when absent or unreadable.
    pub fn state(&self) -> ConsentState {
        let Some(raw) = self.storage.get(CONSENT_STORAGE_KEY) else {
            return ConsentState::undecided();
        };

        ConsentState::from_stored(&raw).unwrap_or_else(|| {
            warn!(key = CONSENT_STORAGE_KEY, "Unreadable consent value, treating as no consent");
            ConsentState::undecided()
        })
    }

    /// Third-party forwarding is allowed only with analytics consent.
    pub fn is_tracking_allowed(&self) -> bool {
        self.state().analytics
    }

    /// Replace the stored decision.
    pub fn save(&self, state: &ConsentState) {
        self.storage.set(CONSENT_STORAGE_KEY, &state.to_stored());
    }

    /// Forget the decision.
    pub fn clear(&self) {
        self.storage.remove(CONSENT_STORAGE_KEY);
    }
}
