//! OpsDesk Authorization
//!
//! Single source of truth for "what can the current session do": the
//! [`AuthStore`] owns the current user and derived permission set, and the
//! [`RouteGuard`] gates navigable views on authentication plus a module's
//! read capability.
//!
//! The store is fail-closed throughout: while permissions are loading, and
//! after a failed load, every capability query answers `false`. A failed
//! load never reaches callers as an error; it is recorded as state for
//! optional display.

#![forbid(unsafe_code)]

pub mod guard;
pub mod store;

pub use guard::{RouteDecision, RouteGuard};
pub use store::AuthStore;
