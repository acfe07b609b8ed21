//! Authorization store
//!
//! Owns the current user and the derived permission set for one session.
//! Shared across components via cheap clones (`Arc` interior); the UI reads
//! it synchronously on every navigation while `load` refreshes it across an
//! async boundary.

use opsdesk_core::effects::IdentityEffects;
use opsdesk_core::permission::{action, PermissionSet};
use opsdesk_core::session::CredentialStore;
use opsdesk_core::{CurrentUser, OpsError};
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Default)]
struct AuthState {
    user: Option<CurrentUser>,
    permissions: PermissionSet,
    loading: bool,
    error: Option<OpsError>,
}

/// Session-scoped authorization store.
///
/// Capability queries are exact-match lookups against the loaded permission
/// set and answer `false` until a load succeeds. Loading state and the last
/// load error are exposed separately so callers can defer a terminal
/// "denied" UI until loading completes.
#[derive(Clone)]
pub struct AuthStore {
    credentials: Arc<dyn CredentialStore>,
    state: Arc<RwLock<AuthState>>,
}

impl AuthStore {
    /// Create a store with no user loaded.
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            credentials,
            state: Arc::new(RwLock::new(AuthState::default())),
        }
    }

    /// Load (or reload) the current user and permission set.
    ///
    /// Without a session credential this resets to the empty state and makes
    /// no network call. On identity failure the store degrades to an empty
    /// permission set (fail-closed) and records the error; it never
    /// propagates to the caller. Idempotent and safe to call repeatedly,
    /// e.g. on explicit refresh after login.
    pub async fn load(&self, identity: &dyn IdentityEffects) {
        if !self.credentials.is_authenticated() {
            let mut state = self.state.write();
            *state = AuthState::default();
            return;
        }

        self.state.write().loading = true;

        let result = identity.current_user().await;

        let mut state = self.state.write();
        state.loading = false;
        match result {
            Ok(user) => {
                tracing::debug!(
                    user = %user.id,
                    permissions = user.permissions.len(),
                    "authorization loaded"
                );
                state.permissions = user.permissions.clone();
                state.user = Some(user);
                state.error = None;
            }
            Err(err) => {
                // Fail closed: a partial or failed load grants nothing.
                tracing::warn!(error = %err, "authorization load failed; clearing permissions");
                state.user = None;
                state.permissions = PermissionSet::empty();
                state.error = Some(err);
            }
        }
    }

    /// Discard the user and permissions (logout).
    pub fn clear(&self) {
        *self.state.write() = AuthState::default();
    }

    /// Exact-match capability lookup for `"<module>:<action>"`.
    ///
    /// Returns `false` (not an error) while permissions have not loaded;
    /// "loading" and "denied" are equally non-permissive for rendering.
    pub fn has_capability(&self, module: &str, action: &str) -> bool {
        self.state.read().permissions.grants(module, action)
    }

    /// Shorthand for `has_capability(module, "read")`.
    pub fn can_read(&self, module: &str) -> bool {
        self.has_capability(module, action::READ)
    }

    /// Shorthand for `has_capability(module, "create")`.
    pub fn can_create(&self, module: &str) -> bool {
        self.has_capability(module, action::CREATE)
    }

    /// Shorthand for `has_capability(module, "update")`.
    pub fn can_update(&self, module: &str) -> bool {
        self.has_capability(module, action::UPDATE)
    }

    /// Shorthand for `has_capability(module, "delete")`.
    pub fn can_delete(&self, module: &str) -> bool {
        self.has_capability(module, action::DELETE)
    }

    /// Whether a permission load is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// Whether a session credential is present.
    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_authenticated()
    }

    /// The loaded user, if any.
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.state.read().user.clone()
    }

    /// The last load failure, for optional display.
    pub fn error(&self) -> Option<OpsError> {
        self.state.read().error.clone()
    }
}
