// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fall-through composition of delivery tiers.
//!
//! `TieredNotifyAdapter<A, B>` tries `A` and falls back to `B` when `A`
//! fails for any reason (permission denied, API unavailable, runtime
//! error). Nest to build the full preference order, e.g.
//! `Tiered::new(desktop, Tiered::new(foreground, toast))`.

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;

#[derive(Clone)]
pub struct TieredNotifyAdapter<A, B> {
    preferred: A,
    fallback: B,
}

impl<A, B> TieredNotifyAdapter<A, B> {
    pub fn new(preferred: A, fallback: B) -> Self {
        Self {
            preferred,
            fallback,
        }
    }
}

#[async_trait]
impl<A, B> NotifyAdapter for TieredNotifyAdapter<A, B>
where
    A: NotifyAdapter,
    B: NotifyAdapter,
{
    async fn notify(&self, title: &str, body: &str, tag: &str) -> Result<(), NotifyError> {
        match self.preferred.notify(title, body, tag).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::debug!(error = %e, %tag, "delivery tier failed, falling through");
                self.fallback.notify(title, body, tag).await
            }
        }
    }
}

#[cfg(test)]
#[path = "tiered_tests.rs"]
mod tests;
