//! The poll → filter → classify → forward → dismiss loop.
//!
//! [`Relay`] owns the notification source and the destination for the whole
//! process lifetime. Cycles run strictly one after another: a cycle, then a
//! sleep of `poll_interval_seconds`, then the next cycle.
//!
//! Delivery is at-most-once per notification id. A watched notification is
//! dismissed even when forwarding it failed, trading a possibly lost message
//! for never posting the same alert twice.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use upsrelay_core::{Decision, Notification, RelayConfig, RelayRules};
use upsrelay_events::Destination;

use crate::dedup::DedupWindow;
use crate::error::{CycleError, StartupError};
use crate::source::{AccessStatus, NotificationSource};

/// Counters for one poll cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Notifications listed by the source, from any application.
    pub seen: usize,
    /// Left pending because another application raised them.
    pub ignored: usize,
    /// Dismissed without forwarding (self-test results).
    pub suppressed: usize,
    pub forwarded: usize,
    pub forward_failed: usize,
    /// Already forwarded earlier; only the dismissal was retried.
    pub deduplicated: usize,
    pub dismissed: usize,
}

impl CycleReport {
    /// True when every listed notification belonged to another application.
    pub fn is_idle(&self) -> bool {
        self.seen == self.ignored
    }
}

// ---------------------------------------------------------------------------
// Relay
// ---------------------------------------------------------------------------

pub struct Relay<S, D> {
    source: S,
    destination: D,
    rules: RelayRules,
    dedup: DedupWindow,
    poll_interval: Duration,
    fetch_timeout: Duration,
}

impl<S, D> Relay<S, D>
where
    S: NotificationSource,
    D: Destination,
{
    pub fn new(source: S, destination: D, config: &RelayConfig) -> Self {
        Self {
            source,
            destination,
            rules: RelayRules::from_config(config),
            dedup: DedupWindow::new(config.dedup_window()),
            poll_interval: config.poll_interval(),
            fetch_timeout: config.request_timeout(),
        }
    }

    /// Run poll cycles until `cancel` fires.
    ///
    /// Cycle failures are logged and never end the loop. Cancellation is
    /// observed during the sleep between cycles.
    pub async fn run(&mut self, cancel: CancellationToken) {
        tracing::info!(
            watched_app = %self.rules.watched_app(),
            poll_interval_secs = self.poll_interval.as_secs(),
            "Relay loop started",
        );

        loop {
            match self.run_cycle().await {
                Ok(report) if report.is_idle() => {
                    tracing::trace!(seen = report.seen, "Nothing to relay");
                }
                Ok(report) => {
                    tracing::info!(
                        forwarded = report.forwarded,
                        forward_failed = report.forward_failed,
                        suppressed = report.suppressed,
                        deduplicated = report.deduplicated,
                        dismissed = report.dismissed,
                        "Poll cycle complete",
                    );
                }
                Err(e) => {
                    tracing::error!(error = %e, "Poll cycle failed");
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Relay loop cancelled");
                    break;
                }
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }
    }

    /// Fetch pending notifications once and process every one of them.
    ///
    /// A failed dismissal aborts the rest of the cycle; the remaining
    /// notifications stay pending for the next poll.
    pub async fn run_cycle(&mut self) -> Result<CycleReport, CycleError> {
        self.dedup.prune();

        let pending = match tokio::time::timeout(self.fetch_timeout, self.source.list_pending())
            .await
        {
            Ok(Ok(pending)) => pending,
            Ok(Err(e)) => return Err(CycleError::Fetch(e)),
            Err(_) => return Err(CycleError::FetchTimeout(self.fetch_timeout)),
        };

        let mut report = CycleReport {
            seen: pending.len(),
            ..CycleReport::default()
        };

        for notification in &pending {
            if !self.process(notification, &mut report).await {
                continue;
            }

            let id = notification.id;
            self.source
                .dismiss(id)
                .await
                .map_err(|source| CycleError::Dismiss { id, source })?;
            report.dismissed += 1;
            tracing::debug!(%id, "Notification dismissed");
        }

        Ok(report)
    }

    /// Filter, classify and forward a single notification.
    ///
    /// Returns whether the notification is ours to dismiss.
    async fn process(&mut self, notification: &Notification, report: &mut CycleReport) -> bool {
        let id = notification.id;

        let message = match self.rules.decide(notification) {
            Decision::Ignore => {
                report.ignored += 1;
                return false;
            }
            Decision::Suppress => {
                tracing::debug!(%id, title = %notification.title, "Suppressing routine notification");
                report.suppressed += 1;
                return true;
            }
            Decision::Forward(message) => message,
        };

        if self.dedup.contains(id) {
            tracing::warn!(%id, "Notification was already forwarded, retrying dismissal only");
            report.deduplicated += 1;
            return true;
        }

        tracing::debug!(%id, severity = %message.severity, title = %message.title, "Forwarding notification");
        match self.destination.post(&message).await {
            Ok(()) => report.forwarded += 1,
            Err(e) => {
                tracing::error!(
                    %id,
                    severity = %message.severity,
                    timed_out = e.is_timeout(),
                    error = %e,
                    "Failed to forward notification, dismissing anyway",
                );
                report.forward_failed += 1;
            }
        }
        self.dedup.record(id);
        true
    }
}

// ---------------------------------------------------------------------------
// Startup
// ---------------------------------------------------------------------------

/// Ask the source for access; anything but a grant is fatal.
pub async fn ensure_access<S: NotificationSource>(source: &S) -> Result<(), StartupError> {
    match source.request_access().await? {
        AccessStatus::Granted => {
            tracing::info!("Notification listener access granted");
            Ok(())
        }
        AccessStatus::Denied => Err(StartupError::AccessDenied),
    }
}

/// Check access, then run the relay loop until `cancel` fires.
pub async fn start<S, D>(
    config: &RelayConfig,
    source: S,
    destination: D,
    cancel: CancellationToken,
) -> Result<(), StartupError>
where
    S: NotificationSource,
    D: Destination,
{
    ensure_access(&source).await?;
    Relay::new(source, destination, config).run(cancel).await;
    Ok(())
}
