//! External delivery channels for relay messages.

pub mod webhook;

use upsrelay_core::RelayMessage;

use self::webhook::WebhookError;

/// Somewhere a [`RelayMessage`] can be posted.
///
/// A post is a single attempt; the relay never retries, so a failure here
/// means the message is lost.
pub trait Destination: Send + Sync {
    fn post(
        &self,
        message: &RelayMessage,
    ) -> impl std::future::Future<Output = Result<(), WebhookError>> + Send;
}
