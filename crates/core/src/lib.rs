// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nudge-core: domain types for the nudge reminder engine

pub mod action;
pub mod clock;
pub mod event;
pub mod reminder;
pub mod task;

pub use action::{ActionParseError, AlertAction, AlertActionKind};
pub use clock::{Clock, FakeClock, SystemClock};
pub use event::Event;
pub use reminder::ReminderKey;
pub use task::{Task, TaskId};

/// Milliseconds per lead-time minute.
pub const MS_PER_MINUTE: i64 = 60_000;
