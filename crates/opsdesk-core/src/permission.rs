//! Capability tokens and permission sets
//!
//! A permission is an opaque `"<module>:<action>"` string granted to the
//! session user. Tokens are compared by exact string equality only; there is
//! no wildcard or hierarchy semantics, and deliberately no per-module type
//! hierarchy. The action vocabulary is open-ended (`read`, `create`,
//! `update`, `delete`, `convert`, ...).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Canonical action names shared by most modules.
pub mod action {
    /// View records of a module
    pub const READ: &str = "read";
    /// Create new records
    pub const CREATE: &str = "create";
    /// Update existing records
    pub const UPDATE: &str = "update";
    /// Delete records
    pub const DELETE: &str = "delete";
}

/// An opaque capability token of the form `"module:action"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(String);

impl Permission {
    /// Build a token from a module and an action.
    pub fn new(module: &str, action: &str) -> Self {
        Self(format!("{module}:{action}"))
    }

    /// Wrap a raw token as granted by the identity provider.
    pub fn from_token(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Permission {
    fn from(token: &str) -> Self {
        Self::from_token(token)
    }
}

/// The flat set of permission tokens granted to a session.
///
/// Lookup is exact-match set membership; an empty set grants nothing, which
/// is also the fail-closed state used while permissions are loading or after
/// a failed load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(HashSet<Permission>);

impl PermissionSet {
    /// Create an empty set (grants nothing).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from raw tokens.
    pub fn from_tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self(tokens.into_iter().map(Permission::from_token).collect())
    }

    /// Whether the set grants `"<module>:<action>"`.
    pub fn grants(&self, module: &str, action: &str) -> bool {
        self.0.contains(&Permission::new(module, action))
    }

    /// Whether the exact token is present.
    pub fn contains(&self, permission: &Permission) -> bool {
        self.0.contains(permission)
    }

    /// Number of granted tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set grants nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_token_format() {
        let p = Permission::new("leads", action::READ);
        assert_eq!(p.as_str(), "leads:read");
        assert_eq!(p, Permission::from_token("leads:read"));
    }

    #[test]
    fn test_exact_match_only() {
        let set = PermissionSet::from_tokens(["leads:read", "students:update"]);
        assert!(set.grants("leads", "read"));
        assert!(set.grants("students", "update"));
        // No hierarchy or prefix semantics
        assert!(!set.grants("leads", "update"));
        assert!(!set.grants("lead", "read"));
        assert!(!set.grants("leads", "rea"));
    }

    #[test]
    fn test_open_action_vocabulary() {
        let set = PermissionSet::from_tokens(["leads:convert"]);
        assert!(set.grants("leads", "convert"));
        assert!(!set.grants("leads", "read"));
    }

    #[test]
    fn test_empty_set_grants_nothing() {
        let set = PermissionSet::empty();
        assert!(set.is_empty());
        assert!(!set.grants("leads", "read"));
    }

    proptest! {
        // Membership and grants() must always agree: grants(m, a) is exactly
        // set membership of the joined "m:a" token.
        #[test]
        fn prop_grants_agrees_with_membership(
            tokens in proptest::collection::hash_set("[a-z]{1,8}:[a-z]{1,8}", 0..16),
            module in "[a-z]{1,8}",
            action in "[a-z]{1,8}",
        ) {
            let joined = format!("{module}:{action}");
            let expected = tokens.contains(&joined);
            let set = PermissionSet::from_tokens(tokens);
            prop_assert_eq!(set.grants(&module, &action), expected);
        }
    }
}
