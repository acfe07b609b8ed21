//! Notification REST API interface

use crate::errors::OpsError;
use crate::notification::Notification;
use async_trait::async_trait;

/// REST seam for the notification resource.
///
/// Every mutation here is confirmed server-side before the stores mirror it
/// locally; a failed call must leave the server untouched from the caller's
/// perspective (the stores leave local state unchanged on `Err`).
#[async_trait]
pub trait NotificationApiEffects: Send + Sync {
    /// Authoritative unread count for the current user.
    async fn unread_count(&self) -> Result<u64, OpsError>;

    /// Page of notifications, most recent first.
    async fn list(&self, page: u32, limit: u32) -> Result<Vec<Notification>, OpsError>;

    /// Mark one notification as read.
    async fn mark_as_read(&self, id: &str) -> Result<(), OpsError>;

    /// Mark every notification as read.
    async fn mark_all_as_read(&self) -> Result<(), OpsError>;

    /// Delete one notification.
    async fn delete(&self, id: &str) -> Result<(), OpsError>;
}
