// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-endpoint schedule state.
//!
//! Each registered push endpoint owns an independent delay bridge and
//! job list — endpoints never see each other's schedules, and dropping
//! an endpoint drops everything it armed. Keys are client-supplied and
//! opaque; scheduling the same key again replaces the pending job.

use nudge_core::Clock;
use nudge_engine::{DelayBridge, DelayHandle};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Notify;
use tracing::debug;

/// One item of a schedule request, already deserialized from the wire.
#[derive(Debug, Clone)]
pub struct ScheduleItem {
    pub key: String,
    pub when_ms: i64,
    pub payload: Value,
}

/// Why one schedule item was rejected.
#[derive(Debug, Clone, Serialize)]
pub struct ItemError {
    pub index: usize,
    pub key: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(String),
    /// At least one item failed validation; nothing was scheduled.
    #[error("invalid schedule items ({} rejected)", .0.len())]
    InvalidItems(Vec<ItemError>),
}

/// A job whose fire instant was reached, ready for push delivery.
#[derive(Debug, Clone)]
pub struct DueJob {
    pub endpoint: String,
    pub key: String,
    pub when_ms: i64,
    pub payload: Value,
}

struct PendingJob {
    when_ms: i64,
    payload: Value,
    handle: DelayHandle,
}

#[derive(Default)]
struct EndpointJobs {
    bridge: DelayBridge,
    jobs: HashMap<String, PendingJob>,
    by_handle: HashMap<DelayHandle, String>,
}

impl EndpointJobs {
    fn schedule(&mut self, item: ScheduleItem, now_ms: i64) {
        if let Some(previous) = self.jobs.remove(&item.key) {
            self.bridge.cancel(previous.handle);
            self.by_handle.remove(&previous.handle);
        }
        let handle = self.bridge.arm(item.when_ms, now_ms);
        self.by_handle.insert(handle, item.key.clone());
        self.jobs.insert(
            item.key,
            PendingJob {
                when_ms: item.when_ms,
                payload: item.payload,
                handle,
            },
        );
    }

    fn cancel(&mut self, key: &str) -> bool {
        match self.jobs.remove(key) {
            Some(job) => {
                self.bridge.cancel(job.handle);
                self.by_handle.remove(&job.handle);
                true
            }
            None => false,
        }
    }

    fn poll_due(&mut self, now_ms: i64) -> Vec<(String, PendingJob)> {
        let mut due = Vec::new();
        for handle in self.bridge.poll(now_ms) {
            let Some(key) = self.by_handle.remove(&handle) else {
                continue;
            };
            let Some(job) = self.jobs.remove(&key) else {
                continue;
            };
            due.push((key, job));
        }
        due
    }
}

/// Shared relay state: registered endpoints and their pending jobs.
#[derive(Clone)]
pub struct RelayState {
    clock: Arc<dyn Clock>,
    endpoints: Arc<Mutex<HashMap<String, EndpointJobs>>>,
    wake: Arc<Notify>,
}

impl RelayState {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            endpoints: Arc::new(Mutex::new(HashMap::new())),
            wake: Arc::new(Notify::new()),
        }
    }

    /// Notified whenever a schedule change may move the next fire
    /// instant earlier; the delivery loop waits on it alongside its
    /// bounded sleep.
    pub fn wake_handle(&self) -> Arc<Notify> {
        Arc::clone(&self.wake)
    }

    /// Register a push endpoint. Returns false if it was already
    /// registered (which keeps its pending jobs).
    pub fn subscribe(&self, endpoint: &str) -> bool {
        let mut endpoints = self.endpoints.lock();
        if endpoints.contains_key(endpoint) {
            return false;
        }
        endpoints.insert(endpoint.to_string(), EndpointJobs::default());
        debug!(endpoint, "registered push endpoint");
        true
    }

    /// Schedule a batch of jobs for one endpoint.
    ///
    /// Every item is validated before anything is armed; one bad item
    /// rejects the whole request so a retry is safe. Returns the number
    /// of jobs scheduled.
    pub fn schedule(&self, endpoint: &str, items: Vec<ScheduleItem>) -> Result<usize, RelayError> {
        let now_ms = self.clock.now_ms();
        let mut endpoints = self.endpoints.lock();
        let jobs = endpoints
            .get_mut(endpoint)
            .ok_or_else(|| RelayError::UnknownEndpoint(endpoint.to_string()))?;

        let errors: Vec<ItemError> = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let reason = if item.key.trim().is_empty() {
                    "key must not be empty"
                } else if item.when_ms <= now_ms {
                    "whenMs must be in the future"
                } else {
                    return None;
                };
                Some(ItemError {
                    index,
                    key: item.key.clone(),
                    reason: reason.to_string(),
                })
            })
            .collect();
        if !errors.is_empty() {
            return Err(RelayError::InvalidItems(errors));
        }

        let count = items.len();
        for item in items {
            jobs.schedule(item, now_ms);
        }
        debug!(endpoint, count, "scheduled jobs");
        self.wake.notify_one();
        Ok(count)
    }

    /// Cancel one pending job. Returns whether it was pending.
    pub fn cancel(&self, endpoint: &str, key: &str) -> Result<bool, RelayError> {
        let mut endpoints = self.endpoints.lock();
        let jobs = endpoints
            .get_mut(endpoint)
            .ok_or_else(|| RelayError::UnknownEndpoint(endpoint.to_string()))?;
        Ok(jobs.cancel(key))
    }

    /// Collect every job across endpoints whose fire instant passed.
    pub fn poll_due(&self) -> Vec<DueJob> {
        let now_ms = self.clock.now_ms();
        let mut due = Vec::new();
        for (endpoint, jobs) in self.endpoints.lock().iter_mut() {
            for (key, job) in jobs.poll_due(now_ms) {
                due.push(DueJob {
                    endpoint: endpoint.clone(),
                    key,
                    when_ms: job.when_ms,
                    payload: job.payload,
                });
            }
        }
        due.sort_by_key(|j| j.when_ms);
        due
    }

    /// Earliest instant the delivery loop must wake at.
    pub fn next_wakeup(&self) -> Option<i64> {
        self.endpoints
            .lock()
            .values()
            .filter_map(|jobs| jobs.bridge.next_wakeup())
            .min()
    }

    /// Current time from the relay's clock.
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Pending job count for one endpoint, if registered.
    pub fn pending_count(&self, endpoint: &str) -> Option<usize> {
        self.endpoints.lock().get(endpoint).map(|jobs| jobs.jobs.len())
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
