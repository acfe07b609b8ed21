//! Session credential access
//!
//! The credential is managed by the application shell (login/logout); the
//! session core only reads it to decide whether network calls are attempted
//! at all. Absence of a credential is never an error: operations no-op.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An opaque bearer token identifying the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token value.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Read-only view of the externally managed session credential.
pub trait CredentialStore: Send + Sync {
    /// The current credential, if a session is active.
    fn token(&self) -> Option<SessionToken>;

    /// Whether a session credential is present.
    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

/// Process-wide credential holder backed by a lock.
///
/// The application shell writes it on login/logout; the session core only
/// reads through the [`CredentialStore`] trait.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    token: RwLock<Option<SessionToken>>,
}

impl InMemoryCredentialStore {
    /// Create an empty (logged-out) store.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Create a store holding the given token.
    pub fn with_token(token: impl Into<String>) -> Arc<Self> {
        let store = Self::default();
        *store.token.write() = Some(SessionToken::new(token));
        Arc::new(store)
    }

    /// Install a credential (login).
    pub fn set(&self, token: SessionToken) {
        *self.token.write() = Some(token);
    }

    /// Remove the credential (logout).
    pub fn clear(&self) {
        *self.token.write() = None;
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn token(&self) -> Option<SessionToken> {
        self.token.read().clone()
    }
}
