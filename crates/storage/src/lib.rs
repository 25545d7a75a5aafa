// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Storage layer for nudge: persisted snooze records and the read-only
//! task-list contract.

mod snooze;
mod tasks;

pub use snooze::{FileSnoozeStore, MemorySnoozeStore, SnoozeRecord, SnoozeStore, StoreError};
pub use tasks::load_tasks;
