// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification adapters.
//!
//! Each adapter is one delivery tier; [`TieredNotifyAdapter`] composes
//! tiers so a failed tier falls through to the next. The in-app toast
//! tier never fails, so a stack ending in it degrades silently instead
//! of surfacing delivery errors.

mod desktop;
mod noop;
mod tiered;
mod toast;

pub use desktop::DesktopNotifyAdapter;
pub use noop::NoOpNotifyAdapter;
pub use tiered::TieredNotifyAdapter;
pub use toast::{Toast, ToastNotifyAdapter};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FailingNotifyAdapter, FakeNotifyAdapter, NotifyCall};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from notify operations
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("send failed: {0}")]
    SendFailed(String),
    #[error("capability unavailable: {0}")]
    Unavailable(String),
}

/// Adapter for delivering a user-visible alert.
///
/// `tag` is the reminder key string; platforms that support replacement
/// semantics use it to collapse duplicate fires of the same alert.
#[async_trait]
pub trait NotifyAdapter: Clone + Send + Sync + 'static {
    async fn notify(&self, title: &str, body: &str, tag: &str) -> Result<(), NotifyError>;
}
