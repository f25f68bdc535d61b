//! WinRT toast listener.
//!
//! `UserNotificationListener` only exposes async operations that complete
//! on a WinRT thread; each call is driven to completion with `.get()` on
//! tokio's blocking pool so the relay task never blocks a runtime worker.

use upsrelay_core::{Notification, NotificationId};
use windows::UI::Notifications::Management::{
    UserNotificationListener, UserNotificationListenerAccessStatus,
};
use windows::UI::Notifications::{KnownNotificationBindings, NotificationKinds, UserNotification};

use super::{AccessStatus, NotificationSource, SourceError};

/// Reads and removes toasts from the Windows notification center.
#[derive(Clone)]
pub struct ToastListener {
    listener: UserNotificationListener,
}

impl ToastListener {
    /// Attach to the listener of the current user session.
    pub fn current() -> Result<Self, SourceError> {
        let listener = UserNotificationListener::Current()?;
        Ok(Self { listener })
    }
}

/// Convert one WinRT toast into a [`Notification`].
fn read_toast(toast: &UserNotification) -> windows::core::Result<Notification> {
    let id = toast.Id()?;
    let app_name = toast
        .AppInfo()?
        .DisplayInfo()?
        .DisplayName()?
        .to_string_lossy();

    let binding = toast
        .Notification()?
        .Visual()?
        .GetBinding(&KnownNotificationBindings::ToastGeneric()?)?;

    let texts = binding
        .GetTextElements()?
        .into_iter()
        .map(|text| text.Text().map(|s| s.to_string_lossy()))
        .collect::<windows::core::Result<Vec<_>>>()?;

    Ok(Notification::from_text_elements(
        NotificationId(id),
        app_name,
        texts,
    ))
}

impl NotificationSource for ToastListener {
    async fn request_access(&self) -> Result<AccessStatus, SourceError> {
        let listener = self.listener.clone();
        let status = tokio::task::spawn_blocking(move || listener.RequestAccessAsync()?.get())
            .await??;

        if status == UserNotificationListenerAccessStatus::Allowed {
            Ok(AccessStatus::Granted)
        } else {
            Ok(AccessStatus::Denied)
        }
    }

    async fn list_pending(&self) -> Result<Vec<Notification>, SourceError> {
        let listener = self.listener.clone();
        let toasts = tokio::task::spawn_blocking(move || {
            listener
                .GetNotificationsAsync(NotificationKinds::Toast)?
                .get()
        })
        .await??;

        let mut notifications = Vec::new();
        for toast in &toasts {
            // A toast without a generic binding or app info is not one we
            // can classify; skip it rather than failing the whole fetch.
            match read_toast(&toast) {
                Ok(n) => notifications.push(n),
                Err(e) => tracing::warn!(error = %e, "Skipping unreadable toast"),
            }
        }
        Ok(notifications)
    }

    async fn dismiss(&self, id: NotificationId) -> Result<(), SourceError> {
        let listener = self.listener.clone();
        tokio::task::spawn_blocking(move || listener.RemoveNotification(id.0)).await??;
        Ok(())
    }
}
