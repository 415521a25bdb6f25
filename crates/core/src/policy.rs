//! Route exclusion and role-based access predicates.
//!
//! Both are pure and total; callers in the UI layer enforce them.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{AccessErrorCode, Error, Result};

/// Whether page-view tracking should be suppressed for `path`.
///
/// A pattern is either an exact path (`/auth`) or a prefix ending in `/*`
/// (`/admin/*` matches `/admin/users` but neither `/admin` nor `/adminx`).
/// Malformed patterns never match, so the page view is still tracked.
pub fn should_exclude_route<S: AsRef<str>>(path: &str, patterns: &[S]) -> bool {
    patterns
        .iter()
        .any(|pattern| route_matches(path, pattern.as_ref()))
}

fn route_matches(path: &str, pattern: &str) -> bool {
    if !pattern.starts_with('/') {
        return false;
    }

    match pattern.strip_suffix('*') {
        Some(prefix) => {
            // Only a single trailing `/*` wildcard is understood
            prefix.ends_with('/') && !prefix.contains('*') && path.starts_with(prefix)
        }
        None => !pattern.contains('*') && path == pattern,
    }
}

/// Application roles as issued by the authentication backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Marketer,
    SalesManager,
    SalesAgent,
    Agent,
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Marketer => "marketer",
            Self::SalesManager => "sales_manager",
            Self::SalesAgent => "sales_agent",
            Self::Agent => "agent",
            Self::Client => "client",
        }
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "marketer" => Ok(Self::Marketer),
            "sales_manager" => Ok(Self::SalesManager),
            "sales_agent" => Ok(Self::SalesAgent),
            "agent" => Ok(Self::Agent),
            "client" => Ok(Self::Client),
            other => Err(Error::validation(format!("unknown role: {}", other))),
        }
    }
}

/// Roles allowed to view the analytics dashboard.
pub const ANALYTICS_VIEW_ROLES: [&str; 4] = ["admin", "super_admin", "marketer", "sales_manager"];

/// Roles allowed to change analytics and integration configuration.
pub const INTEGRATION_MANAGE_ROLES: [&str; 2] = ["admin", "super_admin"];

/// Dashboard visibility check against the current user's role string.
pub fn can_view_analytics(role: &str) -> bool {
    ANALYTICS_VIEW_ROLES.contains(&role)
}

/// Pixel and integration configuration mutation check.
pub fn can_manage_integrations(role: &str) -> bool {
    INTEGRATION_MANAGE_ROLES.contains(&role)
}

/// Fail with ACCESS_001 unless `role` may view analytics.
pub fn require_analytics_view(role: &str) -> Result<()> {
    if can_view_analytics(role) {
        Ok(())
    } else {
        Err(Error::access(
            AccessErrorCode::ViewDenied,
            format!("role '{}' may not view analytics", role),
        ))
    }
}

/// Fail with ACCESS_002 unless `role` may change integration settings.
pub fn require_integration_manage(role: &str) -> Result<()> {
    if can_manage_integrations(role) {
        Ok(())
    } else {
        Err(Error::access(
            AccessErrorCode::ManageDenied,
            format!("role '{}' may not change integration settings", role),
        ))
    }
}
