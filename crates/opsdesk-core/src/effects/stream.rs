//! Server-push event source interface

use crate::errors::OpsError;
use crate::session::SessionToken;
use async_trait::async_trait;

/// Raw frames delivered by the push transport.
///
/// Items are the unparsed frame payloads; `Err` items are transport
/// hiccups the source has already scheduled its own reconnect for. The
/// stream ends when the source is closed for good.
pub type FrameStream =
    std::pin::Pin<Box<dyn futures::Stream<Item = Result<String, OpsError>> + Send>>;

/// Seam over the server-push endpoint (SSE or equivalent).
///
/// The source owns reconnect/backoff for recoverable failures; an
/// [`OpsError::Unauthorized`] from `open` is terminal and must not be
/// retried by the caller.
#[async_trait]
pub trait EventSourceEffects: Send + Sync {
    /// Open a push connection scoped to the given session credential.
    async fn open(&self, token: &SessionToken) -> Result<FrameStream, OpsError>;
}
