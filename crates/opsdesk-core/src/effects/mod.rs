//! Collaborator effect interfaces
//!
//! Trait seams between the session core and the surrounding application
//! shell. The core consumes these interfaces; production implementations
//! (HTTP client, SSE transport, toast presenter) live outside this
//! workspace, and tests substitute in-memory fakes.
//!
//! # Effect Classification
//!
//! - [`identity`]: "who am I" lookup against the login/me endpoint
//! - [`notifications`]: REST notification API (unread-count, list, mark-read,
//!   delete)
//! - [`stream`]: server-push event source yielding raw frames
//! - [`alert`]: transient user-facing alert presentation

pub mod alert;
pub mod identity;
pub mod notifications;
pub mod stream;

pub use alert::{AlertSink, NullAlertSink};
pub use identity::IdentityEffects;
pub use notifications::NotificationApiEffects;
pub use stream::{EventSourceEffects, FrameStream};
