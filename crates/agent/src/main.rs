//! `upsrelay-agent` -- relays APC PowerChute toasts to a chat webhook.
//!
//! Polls the Windows notification center, forwards PowerChute messages to
//! the configured webhook and dismisses them.
//!
//! # Environment variables
//!
//! | Variable           | Required | Default       | Description                 |
//! |--------------------|----------|---------------|-----------------------------|
//! | `UPS_RELAY_CONFIG` | no       | `config.json` | Path to the JSON config     |
//! | `RUST_LOG`         | no       | --            | `tracing` filter directives |

use std::path::PathBuf;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use upsrelay_agent::error::StartupError;
use upsrelay_core::config::DEFAULT_CONFIG_PATH;
use upsrelay_core::RelayConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "upsrelay_agent=info,upsrelay_events=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path: PathBuf = std::env::var("UPS_RELAY_CONFIG")
        .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into())
        .into();

    let config = RelayConfig::load(&config_path).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        std::process::exit(1);
    });

    tracing::info!(
        config = %config_path.display(),
        watched_app = %config.watched_app,
        poll_interval_secs = config.poll_interval_seconds,
        request_timeout_secs = config.request_timeout_seconds,
        "Starting upsrelay-agent",
    );

    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received Ctrl+C, shutting down");
            ctrl_c_cancel.cancel();
        }
    });

    if let Err(e) = run(&config, cancel).await {
        tracing::error!(error = %e, "Relay failed to start");
        std::process::exit(1);
    }
}

#[cfg(windows)]
async fn run(config: &RelayConfig, cancel: CancellationToken) -> Result<(), StartupError> {
    use upsrelay_agent::source::ToastListener;
    use upsrelay_events::WebhookDelivery;

    let source = ToastListener::current()?;
    let destination = WebhookDelivery::new(&config.webhook_url, config.request_timeout())?;
    upsrelay_agent::relay::start(config, source, destination, cancel).await
}

#[cfg(not(windows))]
async fn run(_config: &RelayConfig, _cancel: CancellationToken) -> Result<(), StartupError> {
    Err(upsrelay_agent::source::SourceError::Unsupported.into())
}
