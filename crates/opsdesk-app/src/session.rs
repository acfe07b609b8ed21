//! Session context
//!
//! Owns the authorization store, the notification store, and the stream
//! subscription for one user session. `start` brings the session up
//! (permission load, initial unread-count fetch, stream connect) and
//! `shutdown` tears it down, cancelling the stream exactly once.

use opsdesk_auth::AuthStore;
use opsdesk_core::effects::{AlertSink, EventSourceEffects, IdentityEffects, NotificationApiEffects};
use opsdesk_core::session::CredentialStore;
use opsdesk_notify::{NotificationStore, NotificationStreamClient, StreamHandle};
use parking_lot::Mutex;
use std::sync::Arc;

/// Collaborator implementations supplied by the application shell.
pub struct SessionCollaborators {
    /// Read-only session credential
    pub credentials: Arc<dyn CredentialStore>,
    /// Login/me endpoint
    pub identity: Arc<dyn IdentityEffects>,
    /// Notification REST API
    pub notification_api: Arc<dyn NotificationApiEffects>,
    /// Push-stream transport
    pub event_source: Arc<dyn EventSourceEffects>,
    /// Transient alert presentation
    pub alerts: Arc<dyn AlertSink>,
}

/// One user session's stores and stream subscription.
///
/// The permission load and the notification plumbing are independent
/// in-flight operations; they share no mutable state and need no
/// cross-operation locking.
pub struct SessionContext {
    identity: Arc<dyn IdentityEffects>,
    auth: AuthStore,
    notifications: NotificationStore,
    stream_client: NotificationStreamClient,
    stream: Mutex<Option<Arc<StreamHandle>>>,
}

impl SessionContext {
    /// Build a context from the shell's collaborators. No I/O happens until
    /// [`start`](Self::start).
    pub fn new(collaborators: SessionCollaborators) -> Self {
        let SessionCollaborators {
            credentials,
            identity,
            notification_api,
            event_source,
            alerts,
        } = collaborators;

        let auth = AuthStore::new(credentials.clone());
        let notifications =
            NotificationStore::new(credentials.clone(), notification_api, alerts);
        let stream_client = NotificationStreamClient::new(credentials, event_source);

        Self {
            identity,
            auth,
            notifications,
            stream_client,
            stream: Mutex::new(None),
        }
    }

    /// The session's authorization store.
    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    /// The session's notification store.
    pub fn notifications(&self) -> &NotificationStore {
        &self.notifications
    }

    /// Bring the session up.
    ///
    /// Loads permissions, fetches the initial unread count, and opens the
    /// push stream routing deliveries into the notification store. A failed
    /// unread-count fetch is logged and does not block startup; stream
    /// errors are logged only, since the transport self-heals.
    pub async fn start(&self) {
        self.auth.load(self.identity.as_ref()).await;

        if let Err(err) = self.notifications.refresh_unread_count().await {
            tracing::warn!(error = %err, "initial unread-count fetch failed");
        }

        let store = self.notifications.clone();
        let handle = self.stream_client.connect(
            Arc::new(move |notification| store.on_stream_event(notification)),
            Arc::new(|err| tracing::warn!(error = %err, "notification stream error")),
        );
        *self.stream.lock() = Some(handle);
    }

    /// Tear the session down (logout or shell unmount).
    ///
    /// Cancels the stream subscription exactly once and clears the
    /// authorization state. Idempotent; a second call is a no-op.
    pub fn shutdown(&self) {
        if let Some(handle) = self.stream.lock().take() {
            tracing::debug!("closing notification stream");
            handle.cancel();
        }
        self.stream_client.disconnect();
        self.auth.clear();
    }
}

impl Drop for SessionContext {
    fn drop(&mut self) {
        self.shutdown();
    }
}
