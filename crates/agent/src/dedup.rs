//! Short-lived memory of already-forwarded notification ids.
//!
//! If dismissing a notification fails, the source lists it again on the next
//! poll. The window lets the relay recognise such an id and retry only the
//! dismissal instead of posting the same message twice.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;
use upsrelay_core::NotificationId;

#[derive(Debug)]
pub struct DedupWindow {
    window: Duration,
    seen: HashMap<NotificationId, Instant>,
}

impl DedupWindow {
    /// A window of zero length remembers nothing.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            seen: HashMap::new(),
        }
    }

    /// Remember that `id` was forwarded just now.
    pub fn record(&mut self, id: NotificationId) {
        if self.window.is_zero() {
            return;
        }
        self.seen.insert(id, Instant::now());
    }

    /// Whether `id` was forwarded within the window.
    pub fn contains(&self, id: NotificationId) -> bool {
        self.seen
            .get(&id)
            .is_some_and(|at| at.elapsed() < self.window)
    }

    /// Drop ids recorded longer ago than the window.
    pub fn prune(&mut self) {
        let window = self.window;
        self.seen.retain(|_, at| at.elapsed() < window);
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
