//! Chat webhook delivery.
//!
//! [`WebhookDelivery`] renders a [`RelayMessage`] as a single Discord-style
//! embed and sends it via HTTP POST. Each message gets exactly one attempt,
//! bounded by the client timeout.

use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use upsrelay_core::{RelayMessage, Severity};

use super::Destination;

/// Embed colours, matching the conventional chat palette.
const COLOR_RED: u32 = 0xE7_4C_3C;
const COLOR_GREEN: u32 = 0x2E_CC_71;
const COLOR_ORANGE: u32 = 0xE6_7E_22;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for webhook delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

impl WebhookError {
    /// Whether the request was abandoned because it hit the client timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_timeout())
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    embeds: [Embed<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Embed<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'a str,
    color: u32,
    author: EmbedAuthor<'a>,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct EmbedAuthor<'a> {
    name: &'a str,
}

/// Embed colour for a severity.
pub fn severity_color(severity: Severity) -> u32 {
    match severity {
        Severity::Critical => COLOR_RED,
        Severity::Resolved => COLOR_GREEN,
        Severity::Informational => COLOR_ORANGE,
    }
}

fn build_payload(message: &RelayMessage) -> WebhookPayload<'_> {
    WebhookPayload {
        embeds: [Embed {
            title: &message.title,
            description: &message.body,
            color: severity_color(message.severity),
            author: EmbedAuthor {
                name: &message.author,
            },
            timestamp: Utc::now().to_rfc3339(),
        }],
    }
}

// ---------------------------------------------------------------------------
// WebhookDelivery
// ---------------------------------------------------------------------------

/// Posts relay messages to a single chat webhook URL.
///
/// The underlying `reqwest::Client` pools connections and lives as long as
/// the delivery itself.
pub struct WebhookDelivery {
    client: reqwest::Client,
    url: String,
}

impl WebhookDelivery {
    /// Create a delivery channel whose requests are bounded by `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, WebhookError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Send `message` as one embed.
    pub async fn send(&self, message: &RelayMessage) -> Result<(), WebhookError> {
        let payload = build_payload(message);
        let response = self.client.post(&self.url).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(WebhookError::HttpStatus(response.status().as_u16()));
        }
        tracing::debug!(severity = %message.severity, title = %message.title, "Webhook delivered");
        Ok(())
    }
}

impl Destination for WebhookDelivery {
    async fn post(&self, message: &RelayMessage) -> Result<(), WebhookError> {
        self.send(message).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn message(severity: Severity, body: &str) -> RelayMessage {
        RelayMessage {
            title: "Title".into(),
            body: body.into(),
            severity,
            author: "APC UPS".into(),
        }
    }

    #[test]
    fn new_does_not_panic() {
        let _delivery =
            WebhookDelivery::new("https://example.com/hook", Duration::from_secs(10)).unwrap();
    }

    #[test]
    fn colors_per_severity() {
        assert_eq!(severity_color(Severity::Critical), 0xE74C3C);
        assert_eq!(severity_color(Severity::Resolved), 0x2ECC71);
        assert_eq!(severity_color(Severity::Informational), 0xE67E22);
    }

    #[test]
    fn payload_shape() {
        let msg = message(Severity::Critical, "On battery.");
        let json = serde_json::to_value(build_payload(&msg)).unwrap();

        let embed = &json["embeds"][0];
        assert_eq!(embed["title"], "Title");
        assert_eq!(embed["description"], "On battery.");
        assert_eq!(embed["color"], 0xE74C3C);
        assert_eq!(embed["author"]["name"], "APC UPS");
        assert!(embed["timestamp"].is_string());
        assert_eq!(json["embeds"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn empty_body_omits_description() {
        let msg = message(Severity::Informational, "");
        let json = serde_json::to_value(build_payload(&msg)).unwrap();
        assert!(json["embeds"][0].get("description").is_none());
    }

    #[test]
    fn webhook_error_display_http_status() {
        let err = WebhookError::HttpStatus(502);
        assert_eq!(err.to_string(), "Webhook returned HTTP 502");
        assert!(!err.is_timeout());
    }

    #[test]
    fn webhook_error_display_request() {
        // Build a reqwest error from an invalid URL.
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = WebhookError::Request(req_err);
        assert!(err.to_string().contains("HTTP request failed"));
    }
}
