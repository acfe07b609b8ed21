//! Unified error system for OpsDesk core
//!
//! A single error type covers every operation in the session core. The
//! stores convert collaborator failures into `OpsError` and either record
//! them as state (authorization) or propagate them to the caller (REST
//! mutations).

use serde::{Deserialize, Serialize};

/// Unified error type for all OpsDesk session-core operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum OpsError {
    /// Missing or rejected session credential
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Error message describing the credential failure
        message: String,
    },

    /// Resource not found
    #[error("Not found: {message}")]
    NotFound {
        /// Error message describing what was not found
        message: String,
    },

    /// Network or transport error
    #[error("Network error: {message}")]
    Network {
        /// Error message describing the network issue
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message describing the serialization failure
        message: String,
    },

    /// Invalid input or state
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Internal error
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal failure
        message: String,
    },
}

impl OpsError {
    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error is in the client-auth class.
    ///
    /// Auth-class failures on a stream open are terminal: retrying with the
    /// same credential cannot succeed, so the transport must not reconnect.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_carry_message() {
        let err = OpsError::network("connection refused");
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn test_auth_failure_classification() {
        assert!(OpsError::unauthorized("expired token").is_auth_failure());
        assert!(!OpsError::network("timeout").is_auth_failure());
        assert!(!OpsError::internal("bug").is_auth_failure());
    }
}
