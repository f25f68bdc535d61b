//! In-memory fakes for the notification source and the destination.

#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;
use upsrelay_agent::source::{AccessStatus, NotificationSource, SourceError};
use upsrelay_core::config::DEFAULT_WATCHED_APP;
use upsrelay_core::{Notification, NotificationId, RelayConfig, RelayMessage};
use upsrelay_events::{Destination, WebhookError};

pub const POWER_LOST: &str = "Your UPS battery backup is no longer receiving AC utility power";
pub const POWER_RESTORED: &str = "AC utility power restored to your battery backup.";
pub const SELF_TEST: &str = "Self-test Passed.";

pub fn config() -> RelayConfig {
    serde_json::from_str(r#"{ "webhook_url": "https://example.com/hook" }"#)
        .expect("test config should parse")
}

pub fn toast(id: u32, app: &str, texts: &[&str]) -> Notification {
    Notification::from_text_elements(
        NotificationId(id),
        app,
        texts.iter().map(|s| s.to_string()),
    )
}

pub fn ups_toast(id: u32, texts: &[&str]) -> Notification {
    toast(id, DEFAULT_WATCHED_APP, texts)
}

// ---------------------------------------------------------------------------
// FakeSource
// ---------------------------------------------------------------------------

struct SourceState {
    access: AccessStatus,
    pending: Vec<Notification>,
    /// Scripted fetch failures, consumed one per `list_pending` call.
    fetch_failures: VecDeque<String>,
    /// Ids whose next dismissal fails.
    fail_dismiss_once: HashSet<NotificationId>,
    hang_fetch: bool,
    fetch_calls: usize,
    dismissed: Vec<NotificationId>,
}

/// A notification center holding a live list of pending toasts.
///
/// Dismissing removes a toast from the list; ignored toasts stay listed.
#[derive(Clone)]
pub struct FakeSource {
    state: Arc<Mutex<SourceState>>,
}

impl FakeSource {
    pub fn new(pending: Vec<Notification>) -> Self {
        Self {
            state: Arc::new(Mutex::new(SourceState {
                access: AccessStatus::Granted,
                pending,
                fetch_failures: VecDeque::new(),
                fail_dismiss_once: HashSet::new(),
                hang_fetch: false,
                fetch_calls: 0,
                dismissed: Vec::new(),
            })),
        }
    }

    pub fn deny_access(self) -> Self {
        self.state.lock().unwrap().access = AccessStatus::Denied;
        self
    }

    pub fn fail_next_fetch(&self, message: &str) {
        self.state
            .lock()
            .unwrap()
            .fetch_failures
            .push_back(message.to_string());
    }

    pub fn fail_dismiss_once(&self, id: u32) {
        self.state
            .lock()
            .unwrap()
            .fail_dismiss_once
            .insert(NotificationId(id));
    }

    pub fn hang_fetch(&self) {
        self.state.lock().unwrap().hang_fetch = true;
    }

    pub fn push(&self, notification: Notification) {
        self.state.lock().unwrap().pending.push(notification);
    }

    pub fn pending_ids(&self) -> Vec<u32> {
        self.state.lock().unwrap().pending.iter().map(|n| n.id.0).collect()
    }

    pub fn dismissed(&self) -> Vec<u32> {
        self.state.lock().unwrap().dismissed.iter().map(|id| id.0).collect()
    }

    pub fn fetch_calls(&self) -> usize {
        self.state.lock().unwrap().fetch_calls
    }
}

impl NotificationSource for FakeSource {
    async fn request_access(&self) -> Result<AccessStatus, SourceError> {
        Ok(self.state.lock().unwrap().access)
    }

    async fn list_pending(&self) -> Result<Vec<Notification>, SourceError> {
        let hang = {
            let mut state = self.state.lock().unwrap();
            state.fetch_calls += 1;
            state.hang_fetch
        };
        if hang {
            std::future::pending::<()>().await;
        }

        let mut state = self.state.lock().unwrap();
        if let Some(message) = state.fetch_failures.pop_front() {
            return Err(SourceError::Unavailable(message));
        }
        Ok(state.pending.clone())
    }

    async fn dismiss(&self, id: NotificationId) -> Result<(), SourceError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_dismiss_once.remove(&id) {
            return Err(SourceError::Unavailable(format!("cannot remove {id}")));
        }
        state.pending.retain(|n| n.id != id);
        state.dismissed.push(id);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FakeDestination
// ---------------------------------------------------------------------------

/// Records every posted message; optionally rejects them all.
#[derive(Clone, Default)]
pub struct FakeDestination {
    posts: Arc<Mutex<Vec<RelayMessage>>>,
    reject_with: Arc<Mutex<Option<u16>>>,
    posted: Arc<Notify>,
}

impl FakeDestination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every post fail with the given HTTP status.
    pub fn rejecting(status: u16) -> Self {
        let destination = Self::default();
        *destination.reject_with.lock().unwrap() = Some(status);
        destination
    }

    pub fn posts(&self) -> Vec<RelayMessage> {
        self.posts.lock().unwrap().clone()
    }

    /// Wait until at least `count` posts have been attempted.
    pub async fn wait_for_posts(&self, count: usize) {
        loop {
            let notified = self.posted.notified();
            if self.posts.lock().unwrap().len() >= count {
                return;
            }
            notified.await;
        }
    }
}

impl Destination for FakeDestination {
    async fn post(&self, message: &RelayMessage) -> Result<(), WebhookError> {
        self.posts.lock().unwrap().push(message.clone());
        self.posted.notify_waiters();
        match *self.reject_with.lock().unwrap() {
            Some(status) => Err(WebhookError::HttpStatus(status)),
            None => Ok(()),
        }
    }
}
