//! Thresholds, windows and storage keys used by the tracking pipeline.
//!
//! Settings loaded at runtime default to these values; the constants are
//! exported so downstream crates and tests agree on them.

// === Device Breakpoints (CSS px) ===

/// Viewports narrower than this are `mobile`.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

/// Viewports at least this wide are `desktop`; everything in between is `tablet`.
pub const DESKTOP_BREAKPOINT_PX: u32 = 1024;

// === Debounce ===

/// Quiet period for high-frequency signals such as scroll depth.
pub const DEBOUNCE_WINDOW_MS: u64 = 300;

/// Upper bound accepted for a configured debounce window.
pub const MAX_DEBOUNCE_WINDOW_MS: u64 = 10_000;

// === Document Defaults ===

/// Language recorded when the document does not declare one.
pub const DEFAULT_LANGUAGE: &str = "en";

// === Storage Keys ===

/// Durable scope: the visitor's cookie consent decision.
pub const CONSENT_STORAGE_KEY: &str = "cookie_consent";

/// Durable scope: first-touch UTM parameters.
pub const UTM_STORAGE_KEY: &str = "analytics_utm_params";

/// Session scope: the analytics session identifier.
pub const SESSION_STORAGE_KEY: &str = "analytics_session_id";

// === Backend Tables ===

/// Append-only table receiving one row per tracked event.
pub const EVENTS_TABLE: &str = "analytics_events";

/// Integration settings table, one row per pixel.
pub const SETTINGS_TABLE: &str = "analytics_settings";
