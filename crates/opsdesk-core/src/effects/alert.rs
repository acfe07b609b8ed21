//! Transient alert presentation interface

use crate::notification::Notification;

/// Fire-and-forget presentation of a newly delivered notification.
///
/// Called exactly once per notification that survives stream filtering.
/// Presentation is not part of durable state; implementations typically show
/// a toast/snackbar and drop the value.
pub trait AlertSink: Send + Sync {
    /// Present one transient alert for a fresh notification.
    fn present(&self, notification: &Notification);
}

/// Sink that discards every alert, for headless use and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAlertSink;

impl AlertSink for NullAlertSink {
    fn present(&self, _notification: &Notification) {}
}
