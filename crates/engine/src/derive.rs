// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reminder derivation: task state to desired fire instants.

use nudge_core::{ReminderKey, Task, MS_PER_MINUTE};

/// A reminder a task wants scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedReminder {
    pub key: ReminderKey,
    pub fire_at_ms: i64,
    pub lead_minutes: u32,
    pub label: String,
}

/// Compute the absolute fire instants for a task's lead times.
///
/// Done and undated tasks derive nothing. Fire instants at or before
/// `now_ms` are discarded: a past lead time is never (re)scheduled, so
/// editing a due date into the past drops its reminders silently rather
/// than firing them all at once.
pub fn derive_reminders(task: &Task, now_ms: i64) -> Vec<DerivedReminder> {
    let Some(due_at_ms) = task.due_at_ms else {
        return Vec::new();
    };
    if task.done {
        return Vec::new();
    }

    task.reminders
        .iter()
        .filter_map(|&lead| {
            let fire_at_ms = due_at_ms - i64::from(lead) * MS_PER_MINUTE;
            if fire_at_ms <= now_ms {
                return None;
            }
            Some(DerivedReminder {
                key: ReminderKey::due(&task.id, lead, fire_at_ms),
                fire_at_ms,
                lead_minutes: lead,
                label: lead_label(lead),
            })
        })
        .collect()
}

/// Human-readable label for a lead time.
pub fn lead_label(lead_minutes: u32) -> String {
    if lead_minutes == 0 {
        "due now".to_string()
    } else {
        format!("remind {lead_minutes} minutes before")
    }
}

#[cfg(test)]
#[path = "derive_tests.rs"]
mod tests;
