//! OpsDesk Core - Session Core Foundation
//!
//! Foundational types and collaborator interfaces for the OpsDesk client
//! session core. This crate is pure: it defines the capability model, the
//! domain types shared by the stores, the unified error type, and the
//! effect traits implemented by the surrounding application shell. It
//! contains no runtime coupling beyond `async-trait`.
//!
//! # Layers
//!
//! - [`permission`]: opaque `"module:action"` capability tokens
//! - [`user`]: the authenticated session user and granted permission set
//! - [`notification`]: domain notification records
//! - [`session`]: read-only access to the externally managed credential
//! - [`effects`]: collaborator seams (identity provider, notification REST
//!   API, event source, alert presentation)

#![forbid(unsafe_code)]

pub mod effects;
pub mod errors;
pub mod notification;
pub mod permission;
pub mod session;
pub mod time;
pub mod user;

pub use errors::OpsError;
pub use notification::Notification;
pub use permission::{Permission, PermissionSet};
pub use session::{CredentialStore, InMemoryCredentialStore, SessionToken};
pub use user::CurrentUser;
