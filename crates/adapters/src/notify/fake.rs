// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake notification adapters for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// Recorded notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyCall {
    pub title: String,
    pub body: String,
    pub tag: String,
}

struct FakeNotifyState {
    calls: Vec<NotifyCall>,
}

/// Fake notification adapter that records every delivery.
#[derive(Clone)]
pub struct FakeNotifyAdapter {
    inner: Arc<Mutex<FakeNotifyState>>,
}

impl Default for FakeNotifyAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeNotifyState { calls: Vec::new() })),
        }
    }
}

impl FakeNotifyAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded notifications
    pub fn calls(&self) -> Vec<NotifyCall> {
        self.inner.lock().calls.clone()
    }

    /// Tags of recorded notifications, in delivery order.
    pub fn tags(&self) -> Vec<String> {
        self.inner.lock().calls.iter().map(|c| c.tag.clone()).collect()
    }
}

#[async_trait]
impl NotifyAdapter for FakeNotifyAdapter {
    async fn notify(&self, title: &str, body: &str, tag: &str) -> Result<(), NotifyError> {
        self.inner.lock().calls.push(NotifyCall {
            title: title.to_string(),
            body: body.to_string(),
            tag: tag.to_string(),
        });
        Ok(())
    }
}

/// Adapter that always fails, for exercising tier fall-through.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingNotifyAdapter;

impl FailingNotifyAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotifyAdapter for FailingNotifyAdapter {
    async fn notify(&self, _title: &str, _body: &str, _tag: &str) -> Result<(), NotifyError> {
        Err(NotifyError::Unavailable("permission denied".to_string()))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
