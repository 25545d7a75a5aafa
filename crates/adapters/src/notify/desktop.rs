// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Desktop notification adapter using notify-rust.
//!
//! On macOS, `notify-rust` uses `mac-notification-sys` (Cocoa bindings)
//! to send notifications via the Notification Center. The first
//! notification triggers `ensure_application_set()` which runs an
//! AppleScript to look up a bundle identifier. In a daemon context
//! without Automation permissions, that AppleScript blocks forever. We
//! pre-set the bundle identifier at construction time to bypass the
//! lookup entirely.

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;

#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopNotifyAdapter;

impl DesktopNotifyAdapter {
    pub fn new() -> Self {
        #[cfg(target_os = "macos")]
        {
            // Pre-set the application bundle identifier so mac-notification-sys
            // skips its NSAppleScript lookup (which blocks forever in daemon
            // processes that lack Automation permissions).
            let _ = mac_notification_sys::set_application("com.apple.Terminal");
        }
        Self
    }
}

#[async_trait]
impl NotifyAdapter for DesktopNotifyAdapter {
    async fn notify(&self, title: &str, body: &str, tag: &str) -> Result<(), NotifyError> {
        let title = title.to_string();
        let body = body.to_string();
        let tag = tag.to_string();
        // notify_rust::Notification::show() is synchronous on macOS.
        // Run on tokio's bounded blocking pool so a slow notification
        // daemon can't stall the engine loop, but report the outcome so
        // the tier stack can fall through on failure.
        let result = tokio::task::spawn_blocking(move || {
            tracing::info!(%title, %tag, "sending desktop notification");
            notify_rust::Notification::new()
                .summary(&title)
                .body(&body)
                .show()
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .await;

        match result {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "desktop notification failed");
                Err(NotifyError::SendFailed(e))
            }
            Err(e) => Err(NotifyError::Unavailable(e.to_string())),
        }
    }
}
