//! Exact-match filtering and severity classification of UPS toasts.
//!
//! Titles are compared byte-for-byte. Vendor messages are free text, and a
//! substring or pattern match would risk misclassifying unrelated toasts.

use crate::config::{RelayConfig, TitleConfig};
use crate::types::{Notification, RelayMessage, Severity};

/// What the relay should do with a single pending notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Raised by another application; leave it pending.
    Ignore,
    /// Routine noise from the watched application; dismiss without posting.
    Suppress,
    /// Post the message, then dismiss.
    Forward(RelayMessage),
}

/// Map a toast title to a severity.
pub fn classify_severity(title: &str, titles: &TitleConfig) -> Severity {
    if title == titles.power_lost {
        Severity::Critical
    } else if title == titles.power_restored {
        Severity::Resolved
    } else {
        Severity::Informational
    }
}

/// Filtering and classification rules derived from the relay config.
#[derive(Debug, Clone)]
pub struct RelayRules {
    watched_app: String,
    author: String,
    titles: TitleConfig,
}

impl RelayRules {
    pub fn new(
        watched_app: impl Into<String>,
        author: impl Into<String>,
        titles: TitleConfig,
    ) -> Self {
        Self {
            watched_app: watched_app.into(),
            author: author.into(),
            titles,
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(&config.watched_app, &config.author, config.titles.clone())
    }

    pub fn watched_app(&self) -> &str {
        &self.watched_app
    }

    /// Whether the notification belongs to the watched application.
    pub fn is_watched(&self, notification: &Notification) -> bool {
        notification.source_app_name == self.watched_app
    }

    /// Decide how to handle `notification`.
    pub fn decide(&self, notification: &Notification) -> Decision {
        if !self.is_watched(notification) {
            return Decision::Ignore;
        }
        if notification.title == self.titles.self_test {
            return Decision::Suppress;
        }
        Decision::Forward(RelayMessage {
            title: notification.title.clone(),
            body: notification.body(),
            severity: classify_severity(&notification.title, &self.titles),
            author: self.author.clone(),
        })
    }
}

impl Default for RelayRules {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_WATCHED_APP,
            crate::config::DEFAULT_AUTHOR,
            TitleConfig::default(),
        )
    }
}
