// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reminder key type for identifying scheduled alerts.
//!
//! A ReminderKey is derived deterministically from its inputs, so two
//! derivation passes over unchanged data produce the same key and
//! scheduling stays idempotent. Keys are namespaced by kind and owning
//! task:
//!
//! - `due:<task>:<lead>:<fire_ms>` for due-based reminders
//! - `snooze:<task>:<fire_ms>` for user-deferred one-shots

use crate::task::TaskId;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Unique identifier for a scheduled reminder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReminderKey(pub String);

impl ReminderKey {
    /// Create a ReminderKey from a raw string (relay-side keys are
    /// client-supplied and opaque).
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the string value of this key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key for a due-based reminder.
    pub fn due(task_id: &TaskId, lead_minutes: u32, fire_at_ms: i64) -> Self {
        Self(format!("due:{}:{}:{}", task_id, lead_minutes, fire_at_ms))
    }

    /// Key for a snoozed one-shot reminder.
    pub fn snooze(task_id: &TaskId, fire_at_ms: i64) -> Self {
        Self(format!("snooze:{}:{}", task_id, fire_at_ms))
    }

    /// Returns true if this is a due-based reminder key.
    pub fn is_due(&self) -> bool {
        self.0.starts_with("due:")
    }

    /// Returns true if this is a snooze key.
    pub fn is_snooze(&self) -> bool {
        self.0.starts_with("snooze:")
    }

    /// Extracts the owning task id portion, if this key carries one.
    ///
    /// For `due:` keys the id is followed by `:<lead>:<fire>`, for
    /// `snooze:` keys by `:<fire>`. Relay-side opaque keys return `None`.
    pub fn task_id_str(&self) -> Option<&str> {
        if let Some(rest) = self.0.strip_prefix("due:") {
            rest.rsplit_once(':')
                .and_then(|(head, _fire)| head.rsplit_once(':'))
                .map(|(task, _lead)| task)
        } else if let Some(rest) = self.0.strip_prefix("snooze:") {
            rest.rsplit_once(':').map(|(task, _fire)| task)
        } else {
            None
        }
    }
}

impl fmt::Display for ReminderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ReminderKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ReminderKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for ReminderKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ReminderKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Borrow<str> for ReminderKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[path = "reminder_tests.rs"]
mod tests;
