// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable wall-clock time.
//!
//! Reminder fire instants are absolute wall-clock points, so the clock
//! reports epoch milliseconds rather than a monotonic instant. Tests
//! drive a [`FakeClock`] to simulate arbitrary elapsed time without
//! sleeping.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync + 'static {
    /// Current time as epoch milliseconds.
    fn now_ms(&self) -> i64;
}

/// System clock backed by [`SystemTime`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// Manually-advanced clock for tests.
///
/// Clones share the same underlying time, so a clock handed to the
/// engine can be advanced from the test body.
#[derive(Clone, Debug, Default)]
pub struct FakeClock {
    now_ms: Arc<Mutex<i64>>,
}

impl FakeClock {
    /// Create a clock starting at epoch zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock starting at the given epoch milliseconds.
    pub fn at(now_ms: i64) -> Self {
        Self {
            now_ms: Arc::new(Mutex::new(now_ms)),
        }
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, by: Duration) {
        *self.now_ms.lock() += by.as_millis() as i64;
    }

    /// Advance the clock by milliseconds.
    pub fn advance_ms(&self, by_ms: i64) {
        *self.now_ms.lock() += by_ms;
    }

    /// Jump the clock to an absolute instant (may move backwards, as a
    /// real wall clock can).
    pub fn set_ms(&self, now_ms: i64) {
        *self.now_ms.lock() = now_ms;
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> i64 {
        *self.now_ms.lock()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
