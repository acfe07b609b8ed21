//! Identity provider interface

use crate::errors::OpsError;
use crate::user::CurrentUser;
use async_trait::async_trait;

/// "Get current user" seam over the login/me endpoint.
///
/// Implementations authenticate with the session credential they were
/// constructed with; the caller decides whether a credential exists before
/// invoking this at all.
#[async_trait]
pub trait IdentityEffects: Send + Sync {
    /// Fetch the authenticated user and their effective permission set.
    ///
    /// Fails with [`OpsError::Unauthorized`] when the credential is rejected
    /// and [`OpsError::Network`] on transport problems.
    async fn current_user(&self) -> Result<CurrentUser, OpsError>;
}
