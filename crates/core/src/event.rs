// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event types emitted by the reminder engine.
//!
//! Serializes with `{"type": "reminder:fired", ...fields}` format so
//! hosts can log or forward events without knowing the enum.

use crate::reminder::ReminderKey;
use crate::task::TaskId;
use serde::{Deserialize, Serialize};

/// Events that surface reminder lifecycle transitions to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A reminder's fire instant was reached and an alert was raised.
    #[serde(rename = "reminder:fired")]
    ReminderFired {
        key: ReminderKey,
        task_id: TaskId,
        label: String,
        fire_at_ms: i64,
    },

    /// A fired alert was deferred by the user.
    #[serde(rename = "reminder:snoozed")]
    ReminderSnoozed {
        /// Key of the alert that was snoozed (consumed).
        key: ReminderKey,
        /// Key of the replacement one-shot.
        snooze_key: ReminderKey,
        task_id: TaskId,
        fire_at_ms: i64,
    },

    /// A fired alert was dropped by the user.
    #[serde(rename = "reminder:dismissed")]
    ReminderDismissed { key: ReminderKey, task_id: TaskId },
}

impl Event {
    /// One-line summary for log output.
    pub fn log_summary(&self) -> String {
        match self {
            Event::ReminderFired { key, label, .. } => {
                format!("fired {} ({})", key, label)
            }
            Event::ReminderSnoozed {
                key, snooze_key, ..
            } => format!("snoozed {} -> {}", key, snooze_key),
            Event::ReminderDismissed { key, .. } => format!("dismissed {}", key),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
