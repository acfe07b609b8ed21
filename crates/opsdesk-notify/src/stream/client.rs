//! Stream connection lifecycle
//!
//! One long-lived subscription per session. The client opens the transport,
//! filters frames through [`super::frame::parse_frame`], and invokes the
//! caller's delivery callbacks from a background task. Cancellation follows
//! the watch-channel shutdown pattern: the handle flips a shutdown flag and
//! aborts the task, and the delivery loop re-checks the flag immediately
//! before every callback so a frame already in flight when cancellation was
//! requested is never delivered.

use futures::StreamExt;
use opsdesk_core::effects::EventSourceEffects;
use opsdesk_core::session::CredentialStore;
use opsdesk_core::{Notification, OpsError};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::frame::parse_frame;

/// Delivery callback for parsed domain notifications.
pub type OnMessage = Arc<dyn Fn(Notification) + Send + Sync>;
/// Callback for transport errors, surfaced for logging only.
pub type OnError = Arc<dyn Fn(OpsError) + Send + Sync>;

/// Abort-capable handle to one stream subscription.
///
/// Cancelling is idempotent; after the first `cancel` no further callback
/// invocation is possible. Dropping the handle cancels as a safety net.
#[derive(Debug)]
pub struct StreamHandle {
    shutdown_tx: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl StreamHandle {
    fn new(shutdown_tx: watch::Sender<bool>, task: JoinHandle<()>) -> Self {
        Self {
            shutdown_tx,
            task: Mutex::new(Some(task)),
        }
    }

    /// Deterministically close the subscription.
    ///
    /// No `on_message`/`on_error` invocation happens after this returns.
    pub fn cancel(&self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(task) = self.task.lock().take() {
            task.abort();
        }
    }

    /// Whether the subscription has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        *self.shutdown_tx.borrow()
    }
}

impl Drop for StreamHandle {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(task) = self.task.lock().take() {
            task.abort();
        }
    }
}

/// Client maintaining at most one live subscription per session.
pub struct NotificationStreamClient {
    credentials: Arc<dyn CredentialStore>,
    transport: Arc<dyn EventSourceEffects>,
    active: Mutex<Option<Arc<StreamHandle>>>,
}

impl NotificationStreamClient {
    /// Create a client over the given transport.
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        transport: Arc<dyn EventSourceEffects>,
    ) -> Self {
        Self {
            credentials,
            transport,
            active: Mutex::new(None),
        }
    }

    /// Open the subscription and start delivering filtered notifications.
    ///
    /// Any prior subscription is cancelled first; exactly one connection is
    /// live per session. Without a credential no connection is attempted and
    /// the returned handle is already cancelled.
    ///
    /// Open-time auth failures are terminal (no retry); other transport
    /// errors are reported to `on_error` and left to the transport's own
    /// reconnect behavior.
    pub fn connect(&self, on_message: OnMessage, on_error: OnError) -> Arc<StreamHandle> {
        // Reconnect implies closing the previous subscription.
        if let Some(prior) = self.active.lock().take() {
            prior.cancel();
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let Some(token) = self.credentials.token() else {
            tracing::debug!("no session credential; notification stream not opened");
            let _ = shutdown_tx.send(true);
            let task = tokio::spawn(async {});
            let handle = Arc::new(StreamHandle::new(shutdown_tx, task));
            *self.active.lock() = Some(handle.clone());
            return handle;
        };

        let transport = self.transport.clone();
        let task = tokio::spawn(run_subscription(
            transport,
            token,
            shutdown_rx,
            on_message,
            on_error,
        ));

        let handle = Arc::new(StreamHandle::new(shutdown_tx, task));
        *self.active.lock() = Some(handle.clone());
        handle
    }

    /// Cancel the live subscription, if any.
    pub fn disconnect(&self) {
        if let Some(handle) = self.active.lock().take() {
            handle.cancel();
        }
    }
}

async fn run_subscription(
    transport: Arc<dyn EventSourceEffects>,
    token: opsdesk_core::SessionToken,
    mut shutdown_rx: watch::Receiver<bool>,
    on_message: OnMessage,
    on_error: OnError,
) {
    let mut frames = match transport.open(&token).await {
        Ok(frames) => frames,
        Err(err) => {
            if err.is_auth_failure() {
                // Terminal: the same credential cannot succeed on retry.
                tracing::warn!(error = %err, "notification stream rejected; not retrying");
            } else {
                tracing::warn!(error = %err, "notification stream failed to open");
            }
            if !*shutdown_rx.borrow() {
                on_error(err);
            }
            return;
        }
    };

    loop {
        let item = tokio::select! {
            _ = shutdown_rx.changed() => break,
            item = frames.next() => item,
        };
        // Guard the in-flight race: a frame may have been yielded while
        // cancellation was requested.
        if *shutdown_rx.borrow() {
            break;
        }
        match item {
            Some(Ok(payload)) => {
                if let Some(notification) = parse_frame(&payload) {
                    on_message(notification);
                }
            }
            Some(Err(err)) => {
                if err.is_auth_failure() {
                    tracing::warn!(error = %err, "notification stream unauthorized; closing");
                    on_error(err);
                    break;
                }
                // Recoverable: the transport retries on its own schedule.
                tracing::debug!(error = %err, "notification stream hiccup");
                on_error(err);
            }
            None => {
                tracing::debug!("notification stream closed by transport");
                break;
            }
        }
    }
}
