//! Restart recovery with the file-backed snooze store: persisted
//! snoozes are re-admitted exactly once, and nothing else survives.

use crate::prelude::*;
use nudge_adapters::FakeNotifyAdapter;
use nudge_core::FakeClock;
use nudge_engine::ReminderEngine;
use nudge_storage::{FileSnoozeStore, SnoozeStore};
use std::path::Path;

fn file_engine(
    path: &Path,
    clock: &FakeClock,
) -> (
    ReminderEngine<FakeNotifyAdapter, FileSnoozeStore, FakeClock>,
    FakeNotifyAdapter,
) {
    let notifier = FakeNotifyAdapter::new();
    let store = FileSnoozeStore::open(path).unwrap();
    let engine = ReminderEngine::new(notifier.clone(), store, clock.clone());
    (engine, notifier)
}

#[tokio::test]
async fn snoozed_alert_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("snoozes.json");
    let clock = FakeClock::at(HOUR_MS);
    let due = 2 * HOUR_MS;
    let tasks = vec![Task::new("t-1", "standup").with_due(due).with_reminders(vec![0])];

    // First process: fire the reminder and snooze it for 10 minutes
    {
        let (mut engine, _notifier) = file_engine(&store_path, &clock);
        engine.recover(tasks.clone()).await;
        clock.set_ms(due);
        engine.tick().await;
        let key = ReminderKey::due(&TaskId::new("t-1"), 0, due);
        engine.snooze(&key, 10).unwrap();
        engine.shutdown();
    }
    assert_eq!(FileSnoozeStore::open(&store_path).unwrap().len(), 1);

    // Second process: the snooze is re-admitted, armed once, and fires
    // at its instant
    let (mut engine, notifier) = file_engine(&store_path, &clock);
    engine.recover(tasks.clone()).await;
    assert_eq!(engine.pending_count(), 1);
    assert!(notifier.calls().is_empty());

    clock.advance_ms(10 * MS_PER_MINUTE);
    engine.tick().await;
    assert_eq!(notifier.calls().len(), 1);
    assert!(engine.active_alerts().iter().next().unwrap().is_snooze());

    // The consumed record is gone from disk
    assert!(FileSnoozeStore::open(&store_path).unwrap().is_empty());
}

#[tokio::test]
async fn stale_snooze_on_disk_is_dropped_without_firing() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("snoozes.json");
    let clock = FakeClock::at(10 * HOUR_MS);
    let task_id = TaskId::new("t-1");

    {
        let mut store = FileSnoozeStore::open(&store_path).unwrap();
        let fire_at_ms = clock.now_ms() - HOUR_MS; // far beyond the grace window
        store
            .put(nudge_storage::SnoozeRecord::new(
                ReminderKey::snooze(&task_id, fire_at_ms),
                task_id.clone(),
                fire_at_ms,
            ))
            .unwrap();
    }

    let (mut engine, notifier) = file_engine(&store_path, &clock);
    engine
        .recover(vec![Task::new("t-1", "standup").with_due(12 * HOUR_MS).with_reminders(vec![0])])
        .await;

    assert!(notifier.calls().is_empty());
    assert!(engine.active_alerts().is_empty());
    assert!(FileSnoozeStore::open(&store_path).unwrap().is_empty());
}

#[tokio::test]
async fn corrupt_store_recovers_empty_and_daemon_keeps_scheduling() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("snoozes.json");
    std::fs::write(&store_path, b"{ not json").unwrap();

    let clock = FakeClock::at(HOUR_MS);
    let (mut engine, notifier) = file_engine(&store_path, &clock);
    engine
        .recover(vec![Task::new("t-1", "standup").with_due(2 * HOUR_MS).with_reminders(vec![0])])
        .await;
    assert_eq!(engine.pending_count(), 1);
    assert!(dir.path().join("snoozes.bak").exists());

    clock.set_ms(2 * HOUR_MS);
    engine.tick().await;
    assert_eq!(notifier.calls().len(), 1);
}
