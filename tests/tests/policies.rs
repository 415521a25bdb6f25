//! Route exclusion and access control predicates.

use analytics_core::{
    can_manage_integrations, can_view_analytics, require_analytics_view,
    require_integration_manage, should_exclude_route,
};
use tracker::DEFAULT_ROUTE_EXCLUSIONS;

#[test]
fn test_prefix_patterns() {
    let patterns = ["/admin/*", "/client-portal/*"];
    assert!(should_exclude_route("/admin/dashboard", &patterns));
    assert!(should_exclude_route("/admin/users", &patterns));
    assert!(should_exclude_route("/client-portal/documents/42", &patterns));
    assert!(!should_exclude_route("/properties", &patterns));
    assert!(!should_exclude_route("/adminx", &patterns));
}

#[test]
fn test_exact_patterns() {
    assert!(should_exclude_route("/auth", &["/auth"]));
    assert!(!should_exclude_route("/auth/login", &["/auth"]));
}

#[test]
fn test_malformed_patterns_never_match() {
    let patterns = ["", "admin/*", "/ad*min", "*", "/admin*"];
    for path in ["/admin", "/admin/dashboard", "/", ""] {
        assert!(!should_exclude_route(path, &patterns), "{}", path);
    }
}

#[test]
fn test_default_exclusions() {
    assert!(should_exclude_route("/agent/leads", &DEFAULT_ROUTE_EXCLUSIONS));
    assert!(!should_exclude_route("/projects/marina", &DEFAULT_ROUTE_EXCLUSIONS));
    assert!(!should_exclude_route("/properties", &[] as &[&str]));
}

#[test]
fn test_dashboard_visibility() {
    for role in ["admin", "super_admin", "marketer", "sales_manager"] {
        assert!(can_view_analytics(role), "{}", role);
        assert!(require_analytics_view(role).is_ok());
    }
    for role in ["client", "agent", "sales_agent", "", "ADMIN"] {
        assert!(!can_view_analytics(role), "{}", role);
    }
    assert_eq!(
        require_analytics_view("client").unwrap_err().error_code(),
        Some("ACCESS_001")
    );
}

#[test]
fn test_integration_mutation() {
    assert!(can_manage_integrations("admin"));
    assert!(can_manage_integrations("super_admin"));
    for role in ["marketer", "sales_manager", "client"] {
        assert!(!can_manage_integrations(role), "{}", role);
    }
    assert_eq!(
        require_integration_manage("marketer").unwrap_err().error_code(),
        Some("ACCESS_002")
    );
}
