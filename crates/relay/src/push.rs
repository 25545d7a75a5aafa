// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Push delivery seam.
//!
//! The relay decides *when* a payload goes out; the transport that
//! carries it to the subscribed client is behind [`PushSender`]. The
//! default sender just logs the delivery, which is enough for local
//! deployments where the client polls the log surface.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum PushError {
    #[error("push failed: {0}")]
    SendFailed(String),
}

/// Transport for delivering a due payload to an endpoint.
#[async_trait]
pub trait PushSender: Clone + Send + Sync + 'static {
    async fn push(&self, endpoint: &str, key: &str, payload: &Value) -> Result<(), PushError>;
}

/// Sender that records deliveries in the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogPushSender;

impl LogPushSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PushSender for LogPushSender {
    async fn push(&self, endpoint: &str, key: &str, payload: &Value) -> Result<(), PushError> {
        info!(endpoint, key, %payload, "push delivery");
        Ok(())
    }
}

/// Recording sender for tests.
#[cfg(test)]
pub use fake::FakePushSender;
