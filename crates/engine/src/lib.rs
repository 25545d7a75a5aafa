// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nudge-engine: the reminder scheduling core.
//!
//! Decides which future instants should produce a user-visible alert,
//! keeps that schedule consistent as tasks change, survives reloads,
//! and bridges the platform ceiling on a single deferred wait.

mod alerts;
mod bridge;
mod derive;
mod engine;
mod error;
mod reconcile;
mod table;

pub use alerts::{ActiveAlert, ActiveAlerts};
pub use bridge::{DelayBridge, DelayHandle, MAX_DELAY_MS};
pub use derive::{derive_reminders, lead_label, DerivedReminder};
pub use engine::ReminderEngine;
pub use error::EngineError;
pub use reconcile::{admit_snoozes, reconcile_tasks, SnoozeAdmission, GRACE_WINDOW_MS, RECONCILE_INTERVAL};
pub use table::{FiredReminder, ScheduleTable};
