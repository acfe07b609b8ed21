//! OpsDesk Notifications
//!
//! One resilient inbound event channel plus the in-memory view it feeds:
//!
//! - [`stream`]: the push-stream client. Opens exactly one long-lived
//!   connection per session, classifies inbound frames (protocol control
//!   frames never reach the application), and republishes parsed domain
//!   notifications through a cancellable subscription.
//! - [`store`]: the notification list and unread counter, reconciled
//!   against both the REST collaborator and the live stream.

#![forbid(unsafe_code)]

pub mod store;
pub mod stream;

pub use store::{NotificationState, NotificationStore};
pub use stream::{NotificationStreamClient, StreamHandle};
