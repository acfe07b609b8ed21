//! Domain notification records
//!
//! A notification is a user-meaningful event (lead created, task due, ...)
//! as opposed to a protocol-level control frame from the push transport.
//! Control frames are filtered before they ever reach this type; anything
//! constructed here carries a stable, unique `id`.

use serde::{Deserialize, Serialize};

/// A domain notification shown in the notification center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Stable unique identifier (required for every domain notification)
    pub id: String,
    /// Event type, e.g. `"LeadCreated"`
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable message
    pub message: String,
    /// Server-assigned status string, rendered as-is
    pub status: String,
    /// Optional structured payload attached by the producer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    /// When the notification was read (ms since epoch); absent while unread
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_at: Option<u64>,
    /// When the notification was created (ms since epoch)
    pub created_at: u64,
}

impl Notification {
    /// A notification is unread iff `read_at` is absent.
    pub fn is_unread(&self) -> bool {
        self.read_at.is_none()
    }
}
