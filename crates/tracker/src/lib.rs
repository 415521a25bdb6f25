//! Consent-aware analytics tracker.
//!
//! [`Analytics`] is the application-facing API. It sits on a [`Tracker`]
//! that persists every event first-party and forwards to third-party pixels
//! only with analytics consent.

pub mod analytics;
pub mod attribution;
pub mod consent;
pub mod context;
pub mod debounce;
pub mod dispatch;
pub mod pixels;
pub mod settings;
pub mod storage;
pub mod tracker;

pub use analytics::Analytics;
pub use attribution::AttributionResolver;
pub use consent::ConsentStore;
pub use context::{MemoryPageContext, PageContext, PageSnapshot};
pub use debounce::Debouncer;
pub use dispatch::{Dispatch, DispatchOutcome};
pub use pixels::{PixelHook, PixelRegistry};
pub use settings::{TrackerSettings, DEFAULT_ROUTE_EXCLUSIONS};
pub use storage::{MemoryStorage, ScopedStorage};
pub use tracker::{Tracker, TrackerConfig};
