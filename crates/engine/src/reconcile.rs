// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciliation: re-derive the desired schedule and correct the live
//! table to match.
//!
//! Driven by three triggers: task-list change, a fixed periodic tick,
//! and startup. The per-task pass is cancel-then-rebuild: stale entries
//! for an edited task are removed, and unchanged reminders regenerate
//! the same key, so re-admission is a no-op timer churn rather than a
//! behavior change.

use crate::derive::derive_reminders;
use crate::table::ScheduleTable;
use nudge_core::Task;
use nudge_storage::SnoozeRecord;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// Tolerance for firing an overdue persisted reminder on recovery
/// instead of discarding it as stale.
pub const GRACE_WINDOW_MS: i64 = 60_000;

/// Fixed interval of the reconciler's periodic tick.
pub const RECONCILE_INTERVAL: Duration = Duration::from_secs(60);

/// What to do with persisted snooze records after an admission pass.
#[derive(Debug, Default)]
pub struct SnoozeAdmission {
    /// Missed within the grace window: fire immediately, delete record.
    pub fire_now: Vec<SnoozeRecord>,
    /// Past beyond grace, or owner task gone/done: delete record, no fire.
    pub drop_stale: Vec<SnoozeRecord>,
}

/// Rebuild due-based schedules from the current task list.
///
/// Owners present in the table with no matching current task lose all
/// their entries (snoozes included); so do completed tasks. Live tasks
/// get their due-based entries cancelled and re-derived, leaving armed
/// snoozes untouched.
pub fn reconcile_tasks(table: &mut ScheduleTable, tasks: &[Task], now_ms: i64) {
    let current: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    for owner in table.owners() {
        if !current.contains(owner.as_str()) {
            let removed = table.cancel_all_for_owner(&owner);
            tracing::debug!(owner = %owner, removed, "cancelled schedules for deleted task");
        }
    }

    for task in tasks {
        if task.done {
            table.cancel_all_for_owner(&task.id);
            continue;
        }
        table.cancel_due_for_owner(&task.id);
        for derived in derive_reminders(task, now_ms) {
            table.upsert(
                derived.key,
                task.id.clone(),
                derived.fire_at_ms,
                task.title.clone(),
                derived.label,
                now_ms,
            );
        }
    }
}

/// Admit persisted snooze records into the table.
///
/// Every record must end up admitted exactly once: keys already armed
/// are skipped, future records are upserted, records missed within the
/// grace window are returned for immediate firing, and anything staler
/// — including records whose task was deleted or completed — is
/// returned for deletion. The caller owns the store writes; admission
/// itself never touches persistence.
pub fn admit_snoozes(
    table: &mut ScheduleTable,
    records: &[SnoozeRecord],
    tasks: &[Task],
    now_ms: i64,
) -> SnoozeAdmission {
    let titles: HashMap<&str, &str> = tasks
        .iter()
        .filter(|t| !t.done)
        .map(|t| (t.id.as_str(), t.title.as_str()))
        .collect();

    let mut admission = SnoozeAdmission::default();
    for record in records {
        if table.has_key(&record.key) {
            continue;
        }
        let Some(&title) = titles.get(record.task_id.as_str()) else {
            // Stale reference: the owning task is gone. Treated as
            // cancellation, not an error.
            admission.drop_stale.push(record.clone());
            continue;
        };
        if record.fire_at_ms < now_ms - GRACE_WINDOW_MS {
            admission.drop_stale.push(record.clone());
        } else if record.fire_at_ms <= now_ms + GRACE_WINDOW_MS {
            admission.fire_now.push(record.clone());
        } else {
            table.upsert(
                record.key.clone(),
                record.task_id.clone(),
                record.fire_at_ms,
                title.to_string(),
                "snoozed reminder".to_string(),
                now_ms,
            );
        }
    }
    admission
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
