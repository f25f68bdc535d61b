use std::time::Duration;

use upsrelay_core::{ConfigError, NotificationId};
use upsrelay_events::WebhookError;

use crate::source::SourceError;

/// Failures that stop the agent before the poll loop starts.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Access to the notification listener was denied")]
    AccessDenied,

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Failed to set up webhook delivery: {0}")]
    Delivery(#[from] WebhookError),
}

/// Failures that end a single poll cycle early. The loop logs them and
/// carries on after the normal sleep.
#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    #[error("Failed to fetch pending notifications: {0}")]
    Fetch(#[source] SourceError),

    #[error("Fetching pending notifications timed out after {0:?}")]
    FetchTimeout(Duration),

    #[error("Failed to dismiss notification {id}: {source}")]
    Dismiss {
        id: NotificationId,
        #[source]
        source: SourceError,
    },
}
