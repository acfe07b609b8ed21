//! Wall-clock helpers
//!
//! Timestamps throughout the session core are milliseconds since the Unix
//! epoch, matching the wire format used by the REST collaborators.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in milliseconds since the Unix epoch.
///
/// A clock before the epoch yields 0 rather than panicking.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_ms_is_nonzero() {
        assert!(now_ms() > 0);
    }
}
