//! Core domain for the UPS notification relay.
//!
//! - [`types`] -- notifications, relay messages and severities.
//! - [`classify`] -- exact-match filter and severity table.
//! - [`config`] -- the JSON config file loaded once at startup.
//! - [`error`] -- configuration errors.

pub mod classify;
pub mod config;
pub mod error;
pub mod types;

pub use classify::{classify_severity, Decision, RelayRules};
pub use config::{RelayConfig, TitleConfig};
pub use error::ConfigError;
pub use types::{Notification, NotificationId, RelayMessage, Severity};
