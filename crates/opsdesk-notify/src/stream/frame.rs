//! Wire frames and the protocol-noise classification rule
//!
//! The push transport's handshake/keepalive frames share their shape with
//! domain events; only content inspection tells them apart. A frame is
//! discarded when any of the following hold:
//!
//! - it has no `id` (domain notifications always carry a stable id)
//! - its `type` contains `"connection"`, case-insensitive
//! - its `message` contains `"connected"` or `"established"`, case-insensitive
//! - its `message`, lowercased, is exactly `"success"`
//!
//! Everything else parses into a [`Notification`]. Non-JSON payloads are
//! transport noise and are dropped without surfacing an error.

use opsdesk_core::Notification;
use serde::Deserialize;

/// Raw inbound frame as the transport delivers it.
///
/// Every field except the payload itself is optional on the wire; the
/// classification rule decides what the frame actually is.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireFrame {
    /// Stable identifier; absent on protocol control frames
    pub id: Option<String>,
    /// Event type
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Human-readable message
    pub message: Option<String>,
    /// Server-assigned status string
    pub status: Option<String>,
    /// Optional structured payload
    pub metadata: Option<serde_json::Value>,
    /// Read timestamp (ms since epoch), absent while unread
    pub read_at: Option<u64>,
    /// Creation timestamp (ms since epoch)
    pub created_at: Option<u64>,
}

fn is_protocol_noise(frame: &WireFrame) -> bool {
    if let Some(kind) = &frame.kind {
        if kind.to_lowercase().contains("connection") {
            return true;
        }
    }
    if let Some(message) = &frame.message {
        let message = message.to_lowercase();
        if message.contains("connected")
            || message.contains("established")
            || message == "success"
        {
            return true;
        }
    }
    false
}

/// Classify a wire frame: `Some` for a domain notification, `None` for
/// protocol noise.
pub fn classify(frame: WireFrame) -> Option<Notification> {
    if is_protocol_noise(&frame) {
        return None;
    }
    // No stable id means this can never enter the notification list.
    let id = frame.id?;
    Some(Notification {
        id,
        kind: frame.kind.unwrap_or_default(),
        message: frame.message.unwrap_or_default(),
        status: frame.status.unwrap_or_else(|| "unread".to_string()),
        metadata: frame.metadata,
        read_at: frame.read_at,
        created_at: frame.created_at.unwrap_or_default(),
    })
}

/// Parse one raw payload into a domain notification.
///
/// Returns `None` both for protocol noise and for malformed payloads; a
/// parse failure is transport noise, not an application error.
pub fn parse_frame(payload: &str) -> Option<Notification> {
    match serde_json::from_str::<WireFrame>(payload) {
        Ok(frame) => classify(frame),
        Err(err) => {
            tracing::trace!(error = %err, "dropping malformed stream frame");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(id: Option<&str>, kind: Option<&str>, message: Option<&str>) -> WireFrame {
        WireFrame {
            id: id.map(str::to_string),
            kind: kind.map(str::to_string),
            message: message.map(str::to_string),
            status: None,
            metadata: None,
            read_at: None,
            created_at: None,
        }
    }

    #[test]
    fn test_domain_frame_is_forwarded() {
        let n = classify(frame(Some("n1"), Some("LeadCreated"), Some("New lead added")))
            .expect("domain frame");
        assert_eq!(n.id, "n1");
        assert_eq!(n.kind, "LeadCreated");
        assert_eq!(n.message, "New lead added");
        assert_eq!(n.status, "unread");
        assert!(n.is_unread());
    }

    #[test]
    fn test_missing_id_is_dropped() {
        assert!(classify(frame(None, Some("LeadCreated"), Some("New lead added"))).is_none());
    }

    #[test]
    fn test_connection_type_is_dropped() {
        assert!(classify(frame(Some("x"), Some("connection"), Some("hi"))).is_none());
        assert!(classify(frame(Some("x"), Some("ConnectionOpened"), Some("hi"))).is_none());
        assert!(classify(frame(Some("x"), Some("SSE_CONNECTION"), Some("hi"))).is_none());
    }

    #[test]
    fn test_handshake_messages_are_dropped() {
        assert!(classify(frame(Some("x"), Some("info"), Some("Connected"))).is_none());
        assert!(classify(frame(Some("x"), Some("info"), Some("stream ESTABLISHED"))).is_none());
        assert!(classify(frame(Some("x"), Some("info"), Some("Success"))).is_none());
        assert!(classify(frame(Some("x"), Some("info"), Some("SUCCESS"))).is_none());
    }

    #[test]
    fn test_success_must_match_exactly() {
        // "success" only filters on exact (case-normalized) equality.
        let n = classify(frame(Some("n2"), Some("TaskDone"), Some("Import success")));
        assert!(n.is_some());
    }

    #[test]
    fn test_malformed_payload_is_dropped_silently() {
        assert!(parse_frame("not json").is_none());
        assert!(parse_frame("[1,2,3]").is_none());
        assert!(parse_frame("").is_none());
    }

    #[test]
    fn test_parse_frame_full_payload() {
        let n = parse_frame(
            r#"{"id":"n1","type":"LeadCreated","message":"New lead added",
               "status":"unread","metadata":{"leadId":42},
               "createdAt":1700000000000}"#,
        )
        .expect("well-formed frame");
        assert_eq!(n.created_at, 1_700_000_000_000);
        assert_eq!(n.metadata.unwrap()["leadId"], 42);
    }

    #[test]
    fn test_read_frame_keeps_read_at() {
        let n = parse_frame(r#"{"id":"n1","type":"T","message":"m","readAt":5,"createdAt":1}"#)
            .expect("well-formed frame");
        assert!(!n.is_unread());
    }
}
