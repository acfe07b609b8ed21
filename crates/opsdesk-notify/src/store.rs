//! Notification store
//!
//! Authoritative in-memory view of the current user's notifications and
//! unread count. [`NotificationState`] is the pure state with its list and
//! counter invariants; [`NotificationStore`] wraps it with the REST
//! collaborator and gates every local mutation on server confirmation.
//!
//! The counter is maintained independently of the list for low-latency UI
//! updates: stream delivery increments it locally without re-fetching the
//! authoritative count, and `refresh_unread_count` is the reconciliation
//! point that bounds drift.

use opsdesk_core::effects::{AlertSink, NotificationApiEffects};
use opsdesk_core::session::CredentialStore;
use opsdesk_core::time::now_ms;
use opsdesk_core::{Notification, OpsError};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default page requested when hydrating the list from REST.
const DEFAULT_PAGE: u32 = 1;
/// Default page size when hydrating the list from REST.
const DEFAULT_LIMIT: u32 = 20;

/// Pure notification list + unread counter state.
///
/// The list is most-recent-first and unique by id. The counter is a local
/// mirror of the server's unread count; it may drift until the next
/// authoritative refresh.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationState {
    items: Vec<Notification>,
    unread: u64,
}

impl NotificationState {
    // ─── Queries ─────────────────────────────────────────────

    /// All notifications, most recent first.
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// Local unread counter.
    pub fn unread_count(&self) -> u64 {
        self.unread
    }

    /// Number of notifications held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a notification by id.
    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.items.iter().find(|n| n.id == id)
    }

    // ─── Mutations ───────────────────────────────────────────

    /// Apply one stream-delivered notification.
    ///
    /// Prepends (most-recent-first) and bumps the counter by exactly 1 when
    /// the notification is unread. A duplicate id is ignored, keeping
    /// repeated delivery idempotent. Returns whether the notification was
    /// applied (and therefore whether an alert should be presented).
    pub fn apply_delivery(&mut self, notification: Notification) -> bool {
        if self.items.iter().any(|n| n.id == notification.id) {
            return false;
        }
        if notification.is_unread() {
            self.unread += 1;
        }
        self.items.insert(0, notification);
        true
    }

    /// Replace the counter with the authoritative server value.
    pub fn set_unread_count(&mut self, count: u64) {
        self.unread = count;
    }

    /// Replace the list with a freshly fetched page.
    pub fn replace_items(&mut self, items: Vec<Notification>) {
        self.items = items;
    }

    /// Mark one notification as read at `read_at_ms`.
    ///
    /// Decrements the counter only when the notification was unread.
    pub fn mark_read(&mut self, id: &str, read_at_ms: u64) {
        if let Some(n) = self.items.iter_mut().find(|n| n.id == id) {
            if n.is_unread() {
                n.read_at = Some(read_at_ms);
                self.unread = self.unread.saturating_sub(1);
            }
        }
    }

    /// Mark every notification as read and zero the counter.
    pub fn mark_all_read(&mut self, read_at_ms: u64) {
        for n in self.items.iter_mut() {
            if n.is_unread() {
                n.read_at = Some(read_at_ms);
            }
        }
        self.unread = 0;
    }

    /// Remove one notification, adjusting the counter if it was unread.
    pub fn remove(&mut self, id: &str) -> Option<Notification> {
        let idx = self.items.iter().position(|n| n.id == id)?;
        let removed = self.items.remove(idx);
        if removed.is_unread() {
            self.unread = self.unread.saturating_sub(1);
        }
        Some(removed)
    }
}

/// Notification store reconciled against REST and the live stream.
///
/// REST mutations are confirmed-first: the corresponding local change is
/// applied only after the server call resolves successfully, and a failure
/// leaves local state untouched while propagating to the caller. Staleness
/// is preferred over showing an unconfirmed read/delete.
#[derive(Clone)]
pub struct NotificationStore {
    credentials: Arc<dyn CredentialStore>,
    api: Arc<dyn NotificationApiEffects>,
    alerts: Arc<dyn AlertSink>,
    state: Arc<RwLock<NotificationState>>,
}

impl NotificationStore {
    /// Create an empty store over the given collaborators.
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        api: Arc<dyn NotificationApiEffects>,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        Self {
            credentials,
            api,
            alerts,
            state: Arc::new(RwLock::new(NotificationState::default())),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> NotificationState {
        self.state.read().clone()
    }

    /// Local unread counter.
    pub fn unread_count(&self) -> u64 {
        self.state.read().unread_count()
    }

    /// Replace the local counter with the authoritative server count.
    ///
    /// Silently no-ops without a session credential; never fails for lack
    /// of one. Called once at session start and on demand thereafter.
    pub async fn refresh_unread_count(&self) -> Result<(), OpsError> {
        if !self.credentials.is_authenticated() {
            return Ok(());
        }
        let count = self.api.unread_count().await?;
        self.state.write().set_unread_count(count);
        Ok(())
    }

    /// Fill the list from the REST collaborator, replacing local items.
    pub async fn hydrate(&self, page: Option<u32>, limit: Option<u32>) -> Result<(), OpsError> {
        if !self.credentials.is_authenticated() {
            return Ok(());
        }
        let items = self
            .api
            .list(page.unwrap_or(DEFAULT_PAGE), limit.unwrap_or(DEFAULT_LIMIT))
            .await?;
        self.state.write().replace_items(items);
        Ok(())
    }

    /// Route one stream-delivered notification into local state.
    ///
    /// Additive and non-reconciling: trusts the stream, does not re-fetch
    /// the authoritative count. Presents exactly one transient alert per
    /// applied notification.
    pub fn on_stream_event(&self, notification: Notification) {
        let applied = self.state.write().apply_delivery(notification.clone());
        if applied {
            tracing::debug!(id = %notification.id, kind = %notification.kind, "notification delivered");
            self.alerts.present(&notification);
        }
    }

    /// Mark one notification as read, server-confirmed first.
    pub async fn mark_as_read(&self, id: &str) -> Result<(), OpsError> {
        self.api.mark_as_read(id).await?;
        self.state.write().mark_read(id, now_ms());
        Ok(())
    }

    /// Mark every notification as read, server-confirmed first.
    pub async fn mark_all_as_read(&self) -> Result<(), OpsError> {
        self.api.mark_all_as_read().await?;
        self.state.write().mark_all_read(now_ms());
        Ok(())
    }

    /// Delete one notification, server-confirmed first.
    pub async fn delete(&self, id: &str) -> Result<(), OpsError> {
        self.api.delete(id).await?;
        self.state.write().remove(id);
        Ok(())
    }
}
