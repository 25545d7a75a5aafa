// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedule table: pending reminders and their armed delays.
//!
//! The table owns a [`DelayBridge`] and maps each reminder key to its
//! pending entry. It is an explicit component constructed once per
//! process and passed by reference — never a module-level singleton —
//! so teardown and test isolation stay visible in the types.

use crate::bridge::{DelayBridge, DelayHandle};
use nudge_core::{ReminderKey, TaskId};
use std::collections::HashMap;

/// A reminder waiting to fire.
#[derive(Debug, Clone)]
pub struct PendingSchedule {
    pub key: ReminderKey,
    pub owner: TaskId,
    pub fire_at_ms: i64,
    pub title: String,
    pub label: String,
    handle: DelayHandle,
}

/// A reminder whose fire instant was reached.
#[derive(Debug, Clone)]
pub struct FiredReminder {
    pub key: ReminderKey,
    pub owner: TaskId,
    pub fire_at_ms: i64,
    pub title: String,
    pub label: String,
}

/// In-memory mapping from reminder key to pending timer.
#[derive(Debug, Default)]
pub struct ScheduleTable {
    bridge: DelayBridge,
    entries: HashMap<ReminderKey, PendingSchedule>,
    by_handle: HashMap<DelayHandle, ReminderKey>,
}

impl ScheduleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pending reminder, arming its delay.
    ///
    /// A no-op if the key is already present — the primary defense
    /// against duplicate timers from repeated reconciliation passes.
    /// Returns true if a new entry was armed.
    pub fn upsert(
        &mut self,
        key: ReminderKey,
        owner: TaskId,
        fire_at_ms: i64,
        title: String,
        label: String,
        now_ms: i64,
    ) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        let handle = self.bridge.arm(fire_at_ms, now_ms);
        self.by_handle.insert(handle, key.clone());
        self.entries.insert(
            key.clone(),
            PendingSchedule {
                key,
                owner,
                fire_at_ms,
                title,
                label,
                handle,
            },
        );
        true
    }

    /// Cancel one pending reminder. Returns true if it was present.
    pub fn cancel_by_key(&mut self, key: &ReminderKey) -> bool {
        match self.entries.remove(key) {
            Some(entry) => {
                self.bridge.cancel(entry.handle);
                self.by_handle.remove(&entry.handle);
                true
            }
            None => false,
        }
    }

    /// Cancel every pending reminder owned by a task.
    pub fn cancel_all_for_owner(&mut self, owner: &TaskId) -> usize {
        self.cancel_where(|entry| &entry.owner == owner)
    }

    /// Cancel only the due-based reminders owned by a task, leaving its
    /// snoozed one-shots armed. Used by the reconciler's per-task
    /// rebuild so a pending snooze survives a due-date edit.
    pub fn cancel_due_for_owner(&mut self, owner: &TaskId) -> usize {
        self.cancel_where(|entry| &entry.owner == owner && entry.key.is_due())
    }

    fn cancel_where(&mut self, pred: impl Fn(&PendingSchedule) -> bool) -> usize {
        let keys: Vec<ReminderKey> = self
            .entries
            .values()
            .filter(|e| pred(e))
            .map(|e| e.key.clone())
            .collect();
        for key in &keys {
            self.cancel_by_key(key);
        }
        keys.len()
    }

    pub fn has_key(&self, key: &ReminderKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &ReminderKey) -> Option<&PendingSchedule> {
        self.entries.get(key)
    }

    /// Distinct owner tags currently present in the table.
    pub fn owners(&self) -> Vec<TaskId> {
        let mut owners: Vec<TaskId> = self.entries.values().map(|e| e.owner.clone()).collect();
        owners.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        owners.dedup();
        owners
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cancel every armed delay and empty the table. Used when the
    /// reminder feature is globally disabled or the process shuts down.
    pub fn clear(&mut self) {
        self.bridge.clear();
        self.entries.clear();
        self.by_handle.clear();
    }

    /// Collect reminders whose fire instant has been reached.
    ///
    /// A fired handle with no table entry lost a cancel-before-fire
    /// race and is dropped silently.
    pub fn poll_fired(&mut self, now_ms: i64) -> Vec<FiredReminder> {
        let mut fired = Vec::new();
        for handle in self.bridge.poll(now_ms) {
            let Some(key) = self.by_handle.remove(&handle) else {
                continue;
            };
            let Some(entry) = self.entries.remove(&key) else {
                continue;
            };
            fired.push(FiredReminder {
                key: entry.key,
                owner: entry.owner,
                fire_at_ms: entry.fire_at_ms,
                title: entry.title,
                label: entry.label,
            });
        }
        fired.sort_by_key(|f| f.fire_at_ms);
        fired
    }

    /// Earliest instant the owning loop must wake at, if anything is
    /// pending. Bounded by the bridge's hop ceiling.
    pub fn next_wakeup(&self) -> Option<i64> {
        self.bridge.next_wakeup()
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
