//! In-memory collaborator fakes shared by the integration tests.

// Each test binary uses a different subset of the fakes.
#![allow(dead_code)]

use async_trait::async_trait;
use opsdesk_core::effects::{
    AlertSink, EventSourceEffects, FrameStream, IdentityEffects, NotificationApiEffects,
};
use opsdesk_core::permission::PermissionSet;
use opsdesk_core::session::SessionToken;
use opsdesk_core::{CurrentUser, Notification, OpsError};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Install a fmt subscriber once so failing tests show the core's tracing.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub struct MockIdentity {
    pub tokens: Vec<&'static str>,
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl MockIdentity {
    pub fn granting(tokens: &[&'static str]) -> Arc<Self> {
        Arc::new(Self {
            tokens: tokens.to_vec(),
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            tokens: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl IdentityEffects for MockIdentity {
    async fn current_user(&self) -> Result<CurrentUser, OpsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(OpsError::network("identity endpoint unreachable"));
        }
        Ok(CurrentUser {
            id: "u1".to_string(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            tenant_id: Some("branch-1".to_string()),
            permissions: PermissionSet::from_tokens(self.tokens.iter().copied()),
        })
    }
}

#[derive(Default)]
pub struct MockNotificationApi {
    pub unread: AtomicU64,
    pub fail_mutations: AtomicBool,
    pub deleted: Mutex<Vec<String>>,
}

impl MockNotificationApi {
    pub fn with_unread(count: u64) -> Arc<Self> {
        let api = Self::default();
        api.unread.store(count, Ordering::SeqCst);
        Arc::new(api)
    }
}

#[async_trait]
impl NotificationApiEffects for MockNotificationApi {
    async fn unread_count(&self) -> Result<u64, OpsError> {
        Ok(self.unread.load(Ordering::SeqCst))
    }

    async fn list(&self, _page: u32, _limit: u32) -> Result<Vec<Notification>, OpsError> {
        Ok(Vec::new())
    }

    async fn mark_as_read(&self, _id: &str) -> Result<(), OpsError> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(OpsError::network("mark-as-read failed"));
        }
        let _ = self
            .unread
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| {
                Some(v.saturating_sub(1))
            });
        Ok(())
    }

    async fn mark_all_as_read(&self) -> Result<(), OpsError> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(OpsError::network("mark-all failed"));
        }
        self.unread.store(0, Ordering::SeqCst);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), OpsError> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(OpsError::network("delete failed"));
        }
        self.deleted.lock().push(id.to_string());
        Ok(())
    }
}

/// Event source backed by an unbounded channel; the test side keeps the
/// sender and injects raw frame payloads.
pub struct ChannelEventSource {
    frames: Mutex<Option<mpsc::UnboundedReceiver<Result<String, OpsError>>>>,
    pub opens: AtomicUsize,
}

impl ChannelEventSource {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedSender<Result<String, OpsError>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Arc::new(Self {
                frames: Mutex::new(Some(rx)),
                opens: AtomicUsize::new(0),
            }),
            tx,
        )
    }
}

#[async_trait]
impl EventSourceEffects for ChannelEventSource {
    async fn open(&self, _token: &SessionToken) -> Result<FrameStream, OpsError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        let rx = self
            .frames
            .lock()
            .take()
            .ok_or_else(|| OpsError::internal("event source already open"))?;
        Ok(Box::pin(UnboundedReceiverStream::new(rx)))
    }
}

/// Alert sink recording every presentation.
#[derive(Default)]
pub struct RecordingAlertSink {
    pub presented: Mutex<Vec<Notification>>,
}

impl RecordingAlertSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(&self) -> usize {
        self.presented.lock().len()
    }
}

impl AlertSink for RecordingAlertSink {
    fn present(&self, notification: &Notification) {
        self.presented.lock().push(notification.clone());
    }
}
