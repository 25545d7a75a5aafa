// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Active alerts: reminders that have fired and are awaiting a user
//! response (snooze or dismiss).
//!
//! An alert stays active until acted on — delivery success is not
//! resolution. The set is small (a handful of concurrently raised
//! reminders at most), so a Vec in arrival order is the right shape.

use nudge_core::{ReminderKey, TaskId};

/// A fired reminder awaiting snooze or dismiss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveAlert {
    pub key: ReminderKey,
    pub task_id: TaskId,
    pub title: String,
    pub label: String,
    /// Instant the reminder was scheduled to fire.
    pub fire_at_ms: i64,
    /// Instant it actually fired (differs after a missed-while-down recovery).
    pub fired_at_ms: i64,
}

impl ActiveAlert {
    /// Whether this alert came from a snoozed one-shot rather than a
    /// due-based reminder.
    pub fn is_snooze(&self) -> bool {
        self.key.is_snooze()
    }
}

/// The set of alerts currently awaiting user action, in arrival order.
#[derive(Debug, Default)]
pub struct ActiveAlerts {
    alerts: Vec<ActiveAlert>,
}

impl ActiveAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an alert. A duplicate key is rejected so a re-fired reminder
    /// cannot stack a second copy of the same alert. Returns true if
    /// the alert was added.
    pub fn insert(&mut self, alert: ActiveAlert) -> bool {
        if self.alerts.iter().any(|a| a.key == alert.key) {
            return false;
        }
        self.alerts.push(alert);
        true
    }

    /// Resolve one alert by key, removing and returning it.
    pub fn remove(&mut self, key: &ReminderKey) -> Option<ActiveAlert> {
        let idx = self.alerts.iter().position(|a| &a.key == key)?;
        Some(self.alerts.remove(idx))
    }

    pub fn get(&self, key: &ReminderKey) -> Option<&ActiveAlert> {
        self.alerts.iter().find(|a| &a.key == key)
    }

    /// All active alerts belonging to one task. A user action arriving
    /// addressed by task rather than by key resolves each of these.
    pub fn for_task(&self, task_id: &TaskId) -> Vec<&ActiveAlert> {
        self.alerts.iter().filter(|a| &a.task_id == task_id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveAlert> {
        self.alerts.iter()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn clear(&mut self) {
        self.alerts.clear();
    }
}

#[cfg(test)]
#[path = "alerts_tests.rs"]
mod tests;
