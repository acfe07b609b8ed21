//! Authenticated session user

use crate::permission::PermissionSet;
use serde::{Deserialize, Serialize};

/// The current session user as returned by the identity provider.
///
/// Fetched once at session start (or on explicit refresh), immutable between
/// refreshes, and discarded on logout. The permission set is the flat list
/// of capability tokens effective for this session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Tenant/branch association, when the deployment is multi-branch
    pub tenant_id: Option<String>,
    /// Capability tokens granted for this session
    pub permissions: PermissionSet,
}

impl CurrentUser {
    /// Whether this user holds `"<module>:<action>"`.
    pub fn has_permission(&self, module: &str, action: &str) -> bool {
        self.permissions.grants(module, action)
    }
}
