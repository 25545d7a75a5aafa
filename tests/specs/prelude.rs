//! Shared helpers for the behavioral specs.

use nudge_adapters::FakeNotifyAdapter;
use nudge_core::FakeClock;
use nudge_engine::ReminderEngine;
use nudge_storage::MemorySnoozeStore;

pub use nudge_core::{Clock, ReminderKey, Task, TaskId, MS_PER_MINUTE};

pub const HOUR_MS: i64 = 60 * MS_PER_MINUTE;

pub type TestEngine = ReminderEngine<FakeNotifyAdapter, MemorySnoozeStore, FakeClock>;

/// Engine wired like the daemon, but with fakes at every seam.
pub fn engine_at(now_ms: i64) -> (TestEngine, FakeNotifyAdapter, FakeClock) {
    let notifier = FakeNotifyAdapter::new();
    let clock = FakeClock::at(now_ms);
    let engine = ReminderEngine::new(notifier.clone(), MemorySnoozeStore::new(), clock.clone());
    (engine, notifier, clock)
}
