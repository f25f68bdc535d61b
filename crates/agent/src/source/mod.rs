//! The OS notification source the relay polls.
//!
//! [`NotificationSource`] is the seam between the relay loop and the
//! platform. On Windows, [`ToastListener`] implements it on top of the
//! WinRT `UserNotificationListener`.

#[cfg(windows)]
mod toast;

#[cfg(windows)]
pub use toast::ToastListener;

use upsrelay_core::{Notification, NotificationId};

/// Outcome of the one-time access request made before polling starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessStatus {
    Granted,
    Denied,
}

/// Errors reported by a notification source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source could not be queried right now.
    #[error("Notification source unavailable: {0}")]
    Unavailable(String),

    /// No notification listener exists for the current platform.
    #[error("Notification listener is not supported on this platform")]
    Unsupported,

    #[cfg(windows)]
    #[error("WinRT call failed: {0}")]
    Platform(#[from] windows::core::Error),

    /// The blocking task that performed the call panicked or was cancelled.
    #[error("Notification source task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// A queue of pending OS notifications that can be listed and dismissed.
pub trait NotificationSource: Send + Sync {
    /// Ask the OS for permission to read notifications.
    fn request_access(
        &self,
    ) -> impl std::future::Future<Output = Result<AccessStatus, SourceError>> + Send;

    /// All toast notifications currently pending, from every application.
    fn list_pending(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Notification>, SourceError>> + Send;

    /// Remove a notification so it is not listed again.
    fn dismiss(
        &self,
        id: NotificationId,
    ) -> impl std::future::Future<Output = Result<(), SourceError>> + Send;
}
