// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The reminder engine: schedule maintenance, alert raising, and user
//! responses, behind one owner.
//!
//! Hosts drive it with three calls — [`ReminderEngine::recover`] once
//! at startup, [`ReminderEngine::tasks_changed`] whenever the task list
//! reloads, and [`ReminderEngine::tick`] on a timer bounded by
//! [`ReminderEngine::next_wakeup`]. Everything else (snooze, dismiss,
//! cross-process actions) reacts to alerts those calls raised.
//!
//! Persistence is fail-open: a snooze-store write that errors is logged
//! and the in-memory schedule carries on, so a broken disk degrades to
//! losing snoozes across restarts rather than losing alerts now.

use crate::alerts::{ActiveAlert, ActiveAlerts};
use crate::error::EngineError;
use crate::reconcile::{admit_snoozes, reconcile_tasks};
use crate::table::{FiredReminder, ScheduleTable};
use nudge_adapters::NotifyAdapter;
use nudge_core::{
    AlertAction, AlertActionKind, Clock, Event, ReminderKey, Task, MS_PER_MINUTE,
};
use nudge_storage::{SnoozeRecord, SnoozeStore};
use tracing::{debug, info, warn};

pub struct ReminderEngine<N, S, C> {
    table: ScheduleTable,
    alerts: ActiveAlerts,
    notifier: N,
    store: S,
    clock: C,
    tasks: Vec<Task>,
    events: Vec<Event>,
}

impl<N, S, C> ReminderEngine<N, S, C>
where
    N: NotifyAdapter,
    S: SnoozeStore,
    C: Clock,
{
    pub fn new(notifier: N, store: S, clock: C) -> Self {
        Self {
            table: ScheduleTable::new(),
            alerts: ActiveAlerts::new(),
            notifier,
            store,
            clock,
            tasks: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Startup reconciliation: rebuild the schedule from the task list
    /// and re-admit persisted snoozes, firing those missed within the
    /// grace window.
    pub async fn recover(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.reconcile().await;
        info!(
            pending = self.table.len(),
            tasks = self.tasks.len(),
            "recovered reminder schedule"
        );
        self.poll_fires().await;
    }

    /// The task list changed: re-derive the schedule against it.
    pub async fn tasks_changed(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.reconcile().await;
        self.poll_fires().await;
    }

    /// Periodic pass: advance bridged delays, catch drift, raise any
    /// reminders whose instant has been reached.
    ///
    /// Fires are collected before the rebuild — an entry that reached
    /// its instant must raise, not be cancelled as stale by the
    /// cancel-then-rebuild pass (re-derivation discards past instants).
    pub async fn tick(&mut self) {
        self.poll_fires().await;
        self.reconcile().await;
    }

    /// Defer an active alert by `minutes`, arming a persisted one-shot
    /// in its place.
    pub fn snooze(&mut self, key: &ReminderKey, minutes: u32) -> Result<ReminderKey, EngineError> {
        let alert = self
            .alerts
            .remove(key)
            .ok_or_else(|| EngineError::AlertNotActive(key.clone()))?;
        let now_ms = self.clock.now_ms();
        let fire_at_ms = now_ms + i64::from(minutes) * MS_PER_MINUTE;
        let snooze_key = ReminderKey::snooze(&alert.task_id, fire_at_ms);

        self.table.upsert(
            snooze_key.clone(),
            alert.task_id.clone(),
            fire_at_ms,
            alert.title.clone(),
            "snoozed reminder".to_string(),
            now_ms,
        );
        self.store_put(SnoozeRecord::new(
            snooze_key.clone(),
            alert.task_id.clone(),
            fire_at_ms,
        ));
        self.events.push(Event::ReminderSnoozed {
            key: alert.key,
            snooze_key: snooze_key.clone(),
            task_id: alert.task_id,
            fire_at_ms,
        });
        Ok(snooze_key)
    }

    /// Drop an active alert without rescheduling.
    pub fn dismiss(&mut self, key: &ReminderKey) -> Result<(), EngineError> {
        let alert = self
            .alerts
            .remove(key)
            .ok_or_else(|| EngineError::AlertNotActive(key.clone()))?;
        self.events.push(Event::ReminderDismissed {
            key: alert.key,
            task_id: alert.task_id,
        });
        Ok(())
    }

    /// Apply a cross-process action message.
    ///
    /// Platform click handlers address the task, not the reminder key,
    /// so the action resolves every active alert the task owns. Returns
    /// how many alerts it resolved; zero means the alert was already
    /// gone (double-click, or resolved in-app first) and is not an
    /// error.
    pub fn handle_action(&mut self, action: &AlertAction) -> usize {
        let keys: Vec<ReminderKey> = self
            .alerts
            .for_task(&action.task_id)
            .into_iter()
            .map(|a| a.key.clone())
            .collect();
        if keys.is_empty() {
            debug!(task_id = %action.task_id, "action for task with no active alert");
            return 0;
        }
        for key in &keys {
            let result = match action.kind {
                AlertActionKind::Snooze { minutes } => self.snooze(key, minutes).map(|_| ()),
                AlertActionKind::Dismiss => self.dismiss(key),
            };
            if let Err(e) = result {
                warn!(key = %key, error = %e, "action lost a race with resolution");
            }
        }
        keys.len()
    }

    /// Earliest instant the host loop must wake at, if anything is
    /// armed.
    pub fn next_wakeup(&self) -> Option<i64> {
        self.table.next_wakeup()
    }

    pub fn active_alerts(&self) -> &ActiveAlerts {
        &self.alerts
    }

    /// Take the events accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Number of reminders currently armed.
    pub fn pending_count(&self) -> usize {
        self.table.len()
    }

    /// Disarm everything. Persisted snoozes stay on disk and come back
    /// through the next [`ReminderEngine::recover`].
    pub fn shutdown(&mut self) {
        self.table.clear();
        self.alerts.clear();
    }

    async fn reconcile(&mut self) {
        let now_ms = self.clock.now_ms();
        reconcile_tasks(&mut self.table, &self.tasks, now_ms);

        let records = match self.store.load_all() {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "snooze store unreadable, skipping admission");
                return;
            }
        };
        let admission = admit_snoozes(&mut self.table, &records, &self.tasks, now_ms);

        for record in admission.drop_stale {
            debug!(key = %record.key, fire_at_ms = record.fire_at_ms, "dropping stale snooze");
            self.store_delete(&record.key);
        }
        for record in admission.fire_now {
            let title = self
                .tasks
                .iter()
                .find(|t| t.id == record.task_id)
                .map(|t| t.title.clone())
                .unwrap_or_default();
            self.store_delete(&record.key);
            self.raise_alert(FiredReminder {
                key: record.key,
                owner: record.task_id,
                fire_at_ms: record.fire_at_ms,
                title,
                label: "snoozed reminder".to_string(),
            })
            .await;
        }
    }

    async fn poll_fires(&mut self) {
        let now_ms = self.clock.now_ms();
        for fired in self.table.poll_fired(now_ms) {
            // A fired snooze is consumed; its durable record has done
            // its job.
            if fired.key.is_snooze() {
                self.store_delete(&fired.key);
            }
            self.raise_alert(fired).await;
        }
    }

    /// Record the alert as active and attempt delivery. Delivery
    /// failure is logged, never fatal: the alert stays active and the
    /// host's in-app surface still shows it.
    async fn raise_alert(&mut self, fired: FiredReminder) {
        let alert = ActiveAlert {
            key: fired.key.clone(),
            task_id: fired.owner.clone(),
            title: fired.title.clone(),
            label: fired.label.clone(),
            fire_at_ms: fired.fire_at_ms,
            fired_at_ms: self.clock.now_ms(),
        };
        if !self.alerts.insert(alert) {
            debug!(key = %fired.key, "suppressing duplicate fire of an active alert");
            return;
        }
        self.events.push(Event::ReminderFired {
            key: fired.key.clone(),
            task_id: fired.owner,
            label: fired.label.clone(),
            fire_at_ms: fired.fire_at_ms,
        });

        if let Err(e) = self
            .notifier
            .notify(&fired.title, &fired.label, fired.key.as_str())
            .await
        {
            warn!(key = %fired.key, error = %e, "alert delivery failed, alert stays active");
        }
    }

    fn store_put(&mut self, record: SnoozeRecord) {
        if let Err(e) = self.store.put(record) {
            warn!(error = %e, "failed to persist snooze, it will not survive a restart");
        }
    }

    fn store_delete(&mut self, key: &ReminderKey) {
        if let Err(e) = self.store.delete(key) {
            warn!(key = %key, error = %e, "failed to delete snooze record");
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
