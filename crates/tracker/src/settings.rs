//! Tracker settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

use analytics_core::limits::{
    DEBOUNCE_WINDOW_MS, DEFAULT_LANGUAGE, DESKTOP_BREAKPOINT_PX, MOBILE_BREAKPOINT_PX,
};
use analytics_core::{Breakpoints, Error, Result};

/// Back-office and portal routes that never emit page views.
pub const DEFAULT_ROUTE_EXCLUSIONS: [&str; 3] = ["/admin/*", "/client-portal/*", "/agent/*"];

/// Tuning knobs for one tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TrackerSettings {
    /// Page-view exclusion patterns (exact path or `/prefix/*`)
    #[serde(default = "default_route_exclusions")]
    pub route_exclusions: Vec<String>,
    /// Quiet period of the debounced variant
    #[serde(default = "default_debounce_window_ms")]
    #[validate(range(min = 1, max = 10_000))]
    pub debounce_window_ms: u64,
    /// Widths below this are mobile
    #[serde(default = "default_mobile_breakpoint")]
    #[validate(range(min = 1))]
    pub mobile_breakpoint: u32,
    /// Widths at or above this are desktop
    #[serde(default = "default_desktop_breakpoint")]
    pub desktop_breakpoint: u32,
    /// Recorded when the page declares no language
    #[serde(default = "default_language")]
    #[validate(length(min = 1, max = 35))]
    pub default_language: String,
}

fn default_route_exclusions() -> Vec<String> {
    DEFAULT_ROUTE_EXCLUSIONS.iter().map(|p| p.to_string()).collect()
}

fn default_debounce_window_ms() -> u64 {
    DEBOUNCE_WINDOW_MS
}

fn default_mobile_breakpoint() -> u32 {
    MOBILE_BREAKPOINT_PX
}

fn default_desktop_breakpoint() -> u32 {
    DESKTOP_BREAKPOINT_PX
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            route_exclusions: default_route_exclusions(),
            debounce_window_ms: default_debounce_window_ms(),
            mobile_breakpoint: default_mobile_breakpoint(),
            desktop_breakpoint: default_desktop_breakpoint(),
            default_language: default_language(),
        }
    }
}

impl TrackerSettings {
    /// Field rules plus the breakpoint ordering.
    pub fn validated(self) -> Result<Self> {
        self.validate()
            .map_err(|e| Error::validation(format!("{}", e)))?;

        if self.desktop_breakpoint <= self.mobile_breakpoint {
            return Err(Error::validation(format!(
                "desktop_breakpoint ({}) must exceed mobile_breakpoint ({})",
                self.desktop_breakpoint, self.mobile_breakpoint
            )));
        }
        Ok(self)
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_window_ms)
    }

    pub fn breakpoints(&self) -> Breakpoints {
        Breakpoints {
            mobile: self.mobile_breakpoint,
            desktop: self.desktop_breakpoint,
        }
    }
}
