//! OpsDesk App - Session Lifecycle
//!
//! Explicitly constructed, explicitly disposed session context. The shell
//! builds a [`SessionContext`] from its collaborator implementations at
//! session start and disposes it on logout; nothing here is an implicit
//! singleton.

#![forbid(unsafe_code)]

pub mod session;

pub use session::{SessionCollaborators, SessionContext};
