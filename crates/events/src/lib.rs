//! Outbound delivery of relay messages.
//!
//! - [`Destination`] -- the seam the relay loop posts through.
//! - [`delivery::webhook`] -- chat webhook channel rendering messages as
//!   embeds.

pub mod delivery;

pub use delivery::webhook::{WebhookDelivery, WebhookError};
pub use delivery::Destination;
