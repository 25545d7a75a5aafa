// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-app toast adapter: the terminal delivery tier.
//!
//! Pushes alerts onto an in-process channel for whatever surface the
//! host renders (status line, UI list). Delivery always succeeds — if
//! the host has dropped its receiver, the alert is discarded, which is
//! exactly the "degrade silently" contract of the last tier.

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// A toast waiting to be rendered in-app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub body: String,
    pub tag: String,
}

#[derive(Clone)]
pub struct ToastNotifyAdapter {
    tx: mpsc::UnboundedSender<Toast>,
}

impl ToastNotifyAdapter {
    /// Create the adapter and the receiving end for the host UI.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Toast>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl NotifyAdapter for ToastNotifyAdapter {
    async fn notify(&self, title: &str, body: &str, tag: &str) -> Result<(), NotifyError> {
        // Send failure means no UI is listening; the toast tier still
        // reports success so nothing above it escalates.
        let _ = self.tx.send(Toast {
            title: title.to_string(),
            body: body.to_string(),
            tag: tag.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "toast_tests.rs"]
mod tests;
