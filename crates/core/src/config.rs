//! Relay configuration loaded once from a JSON file at startup.
//!
//! Only `webhook_url` is required. Everything else falls back to the values
//! PowerChute uses out of the box, so a minimal file is just:
//!
//! ```json
//! { "webhook_url": "https://discord.com/api/webhooks/..." }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use validator::Validate;

use crate::error::ConfigError;

/// Config file read when `UPS_RELAY_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Display name of the APC PowerChute tray application.
pub const DEFAULT_WATCHED_APP: &str = "PowerChute System Tray Power Icon";

/// Author label attached to every relayed message.
pub const DEFAULT_AUTHOR: &str = "APC UPS";

pub const DEFAULT_SELF_TEST_TITLE: &str = "Self-test Passed.";
pub const DEFAULT_POWER_LOST_TITLE: &str =
    "Your UPS battery backup is no longer receiving AC utility power";
pub const DEFAULT_POWER_RESTORED_TITLE: &str =
    "AC utility power restored to your battery backup.";

const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DEDUP_WINDOW_SECS: u64 = 600;

// ---------------------------------------------------------------------------
// TitleConfig
// ---------------------------------------------------------------------------

/// Exact toast titles the relay reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct TitleConfig {
    /// Routine self-test result; dismissed without forwarding.
    #[validate(length(min = 1))]
    pub self_test: String,
    /// Mains power lost.
    #[validate(length(min = 1))]
    pub power_lost: String,
    /// Mains power restored.
    #[validate(length(min = 1))]
    pub power_restored: String,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            self_test: DEFAULT_SELF_TEST_TITLE.to_string(),
            power_lost: DEFAULT_POWER_LOST_TITLE.to_string(),
            power_restored: DEFAULT_POWER_RESTORED_TITLE.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// RelayConfig
// ---------------------------------------------------------------------------

/// Immutable relay settings, constructed once and passed into the loop.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    /// Chat webhook that receives relayed messages.
    #[validate(url)]
    pub webhook_url: String,

    /// Seconds to sleep between poll cycles.
    #[serde(default = "default_poll_interval")]
    #[validate(range(min = 1))]
    pub poll_interval_seconds: u64,

    /// Upper bound on a single fetch or forward call.
    #[serde(default = "default_request_timeout")]
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_seconds: u64,

    /// How long a forwarded id is remembered to suppress duplicate posts
    /// when its dismissal failed. Zero disables the window.
    #[serde(default = "default_dedup_window")]
    pub dedup_window_seconds: u64,

    /// Application display name whose notifications are relayed.
    #[serde(default = "default_watched_app")]
    #[validate(length(min = 1))]
    pub watched_app: String,

    #[serde(default = "default_author")]
    #[validate(length(min = 1))]
    pub author: String,

    #[serde(default)]
    #[validate(nested)]
    pub titles: TitleConfig,
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_dedup_window() -> u64 {
    DEFAULT_DEDUP_WINDOW_SECS
}

fn default_watched_app() -> String {
    DEFAULT_WATCHED_APP.to_string()
}

fn default_author() -> String {
    DEFAULT_AUTHOR.to_string()
}

impl RelayConfig {
    /// Read, parse and validate the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn dedup_window(&self) -> Duration {
        Duration::from_secs(self.dedup_window_seconds)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
