//! First-party analytics tracking for the real-estate web application.
//!
//! Re-exports the member crates and adds settings loading and startup.

pub mod bootstrap;
pub mod settings;

pub use analytics_core;
pub use event_store;
pub use telemetry;
pub use tracker;

pub use analytics_core::{AnalyticsEvent, ConsentState, Error, EventCategory, Result};
pub use bootstrap::{bootstrap, start, AnalyticsRuntime};
pub use settings::{load_settings, load_settings_from, AppSettings};
pub use tracker::{Analytics, Dispatch, DispatchOutcome, Tracker, TrackerConfig};
