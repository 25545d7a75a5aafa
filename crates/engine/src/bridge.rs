// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delay bridge: arbitrary-length waits over a bounded timer primitive.
//!
//! The platform's deferred-execution primitive cannot represent delays
//! beyond [`MAX_DELAY_MS`] (~24.8 days). The bridge chains hops: a delay
//! past the ceiling waits exactly one ceiling-length hop, then
//! re-resolves the remainder against the current clock. Each armed delay
//! is a two-state machine (`DirectWait` / `Bridging`) rather than nested
//! callbacks, so cancellation is uniform no matter how many hops remain.
//!
//! The bridge is poll-driven: the owning loop sleeps until
//! [`DelayBridge::next_wakeup`] (never more than one hop away) and then
//! calls [`DelayBridge::poll`]. A fire instant already in the past fires
//! on the next poll, never synchronously inside `arm`.

use std::collections::HashMap;

/// Maximum delay representable by the underlying timer primitive, in
/// milliseconds (2^31 − 1, ~24.8 days).
pub const MAX_DELAY_MS: i64 = i32::MAX as i64;

/// Handle to an armed delay.
///
/// Stays valid across bridge hops: re-arming an intermediate wake-up
/// replaces the stage, not the handle, so cancelling during the bridging
/// window reliably prevents firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DelayHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BridgeState {
    /// Remaining delay fits the primitive; waiting for the fire instant.
    DirectWait,
    /// Remaining delay exceeds the ceiling; waiting for an intermediate
    /// hop that ends at `hop_ends_ms`.
    Bridging { hop_ends_ms: i64 },
}

#[derive(Debug, Clone)]
struct ArmedDelay {
    fire_at_ms: i64,
    state: BridgeState,
}

impl ArmedDelay {
    fn stage_deadline(&self) -> i64 {
        match self.state {
            BridgeState::DirectWait => self.fire_at_ms,
            BridgeState::Bridging { hop_ends_ms } => hop_ends_ms,
        }
    }
}

/// Manages armed delays for one schedule table.
#[derive(Debug, Default)]
pub struct DelayBridge {
    armed: HashMap<u64, ArmedDelay>,
    next_id: u64,
}

impl DelayBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a delay that fires at `fire_at_ms`.
    ///
    /// A past instant arms a zero-length direct wait that fires on the
    /// next poll.
    pub fn arm(&mut self, fire_at_ms: i64, now_ms: i64) -> DelayHandle {
        let id = self.next_id;
        self.next_id += 1;

        let state = if fire_at_ms - now_ms <= MAX_DELAY_MS {
            BridgeState::DirectWait
        } else {
            BridgeState::Bridging {
                hop_ends_ms: now_ms + MAX_DELAY_MS,
            }
        };
        self.armed.insert(id, ArmedDelay { fire_at_ms, state });
        DelayHandle(id)
    }

    /// Cancel an armed delay. Returns false if the handle already fired
    /// or was cancelled.
    pub fn cancel(&mut self, handle: DelayHandle) -> bool {
        self.armed.remove(&handle.0).is_some()
    }

    /// Returns true if the handle is still armed (in either state).
    pub fn is_armed(&self, handle: DelayHandle) -> bool {
        self.armed.contains_key(&handle.0)
    }

    /// Advance every armed delay against the current clock.
    ///
    /// Elapsed direct waits fire (and are disarmed). Elapsed bridge hops
    /// re-resolve the remaining delay under the same handle; if the
    /// clock jumped past the fire instant entirely, the delay fires in
    /// the same poll.
    pub fn poll(&mut self, now_ms: i64) -> Vec<DelayHandle> {
        let mut fired = Vec::new();

        for (id, delay) in self.armed.iter_mut() {
            match delay.state {
                BridgeState::DirectWait => {
                    if delay.fire_at_ms <= now_ms {
                        fired.push(*id);
                    }
                }
                BridgeState::Bridging { hop_ends_ms } => {
                    if hop_ends_ms > now_ms {
                        continue;
                    }
                    if delay.fire_at_ms - now_ms <= MAX_DELAY_MS {
                        delay.state = BridgeState::DirectWait;
                        if delay.fire_at_ms <= now_ms {
                            fired.push(*id);
                        }
                    } else {
                        delay.state = BridgeState::Bridging {
                            hop_ends_ms: now_ms + MAX_DELAY_MS,
                        };
                    }
                }
            }
        }

        for id in &fired {
            self.armed.remove(id);
        }
        fired.into_iter().map(DelayHandle).collect()
    }

    /// Earliest instant at which the owning loop must call [`poll`].
    ///
    /// Never more than one hop ([`MAX_DELAY_MS`]) past the moment the
    /// nearest delay was last resolved.
    ///
    /// [`poll`]: DelayBridge::poll
    pub fn next_wakeup(&self) -> Option<i64> {
        self.armed.values().map(ArmedDelay::stage_deadline).min()
    }

    /// Number of armed delays.
    pub fn len(&self) -> usize {
        self.armed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }

    /// Disarm everything.
    pub fn clear(&mut self) {
        self.armed.clear();
    }
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;
