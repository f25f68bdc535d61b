//! Domain types shared by the notification source, the relay loop and the
//! delivery channels.

use std::fmt;

use serde::Serialize;

/// Opaque per-source notification identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NotificationId(pub u32);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A pending OS toast notification as reported by the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    /// Display name of the application that raised the toast.
    pub source_app_name: String,
    /// First text element of the toast.
    pub title: String,
    /// Remaining text elements, in display order.
    pub body_lines: Vec<String>,
}

impl Notification {
    /// Build a notification from the raw ordered text elements of a toast.
    ///
    /// The first element becomes the title; a toast without text elements
    /// gets an empty title.
    pub fn from_text_elements(
        id: NotificationId,
        source_app_name: impl Into<String>,
        texts: impl IntoIterator<Item = String>,
    ) -> Self {
        let mut texts = texts.into_iter();
        let title = texts.next().unwrap_or_default();
        Self {
            id,
            source_app_name: source_app_name.into(),
            title,
            body_lines: texts.collect(),
        }
    }

    /// Body lines joined with single spaces.
    pub fn body(&self) -> String {
        self.body_lines.join(" ")
    }
}

/// How urgent a relayed message is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Mains power was lost; the UPS is on battery.
    Critical,
    /// Mains power came back.
    Resolved,
    /// Any other message from the UPS application.
    Informational,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Resolved => "resolved",
            Self::Informational => "informational",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message ready to be posted to a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayMessage {
    pub title: String,
    pub body: String,
    pub severity: Severity,
    /// Fixed author label identifying the UPS source.
    pub author: String,
}
