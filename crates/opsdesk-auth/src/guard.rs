//! Route guard
//!
//! Gates rendering of a navigable view behind authentication and,
//! optionally, the read capability of a required module. The decision is
//! computed on every navigation; nothing is cached, so a permission revoked
//! mid-session takes effect on the next navigation.

use crate::store::AuthStore;

/// Outcome of guarding one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteDecision {
    /// No session credential: send the user to the login view
    RedirectToLogin,
    /// Permissions are still loading: render nothing yet
    Pending,
    /// Authenticated but missing the required module's read capability:
    /// render the access-denied view with a path back to a default view
    Denied,
    /// Render the requested view
    Allowed,
}

impl RouteDecision {
    /// Whether the requested view may render.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Per-view guard configuration.
///
/// A guard without a required module only checks authentication (plus the
/// loading gate), matching views every signed-in user may open.
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    required_module: Option<String>,
}

impl RouteGuard {
    /// Guard that only requires an authenticated session.
    pub fn authenticated_only() -> Self {
        Self::default()
    }

    /// Guard that additionally requires `"<module>:read"`.
    pub fn for_module(module: impl Into<String>) -> Self {
        Self {
            required_module: Some(module.into()),
        }
    }

    /// Evaluate the guard for one navigation.
    pub fn decide(&self, auth: &AuthStore) -> RouteDecision {
        if !auth.is_authenticated() {
            return RouteDecision::RedirectToLogin;
        }
        if auth.is_loading() {
            return RouteDecision::Pending;
        }
        if let Some(module) = &self.required_module {
            if !auth.can_read(module) {
                tracing::debug!(module = %module, "navigation denied");
                return RouteDecision::Denied;
            }
        }
        RouteDecision::Allowed
    }
}
