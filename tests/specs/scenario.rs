//! The two-reminder scenario: a task due at 10:00 with lead times
//! [60, 0], evaluated at 08:00.

use crate::prelude::*;

// Epoch-ms stand-ins for the wall-clock times in the scenario
const T0800: i64 = 8 * HOUR_MS;
const T0900: i64 = 9 * HOUR_MS;
const T1000: i64 = 10 * HOUR_MS;

fn scenario_task() -> Task {
    Task::new("t-report", "file the report")
        .with_due(T1000)
        .with_reminders(vec![60, 0])
}

#[tokio::test]
async fn both_reminders_fire_at_their_instants() {
    let (mut engine, notifier, clock) = engine_at(T0800);
    engine.recover(vec![scenario_task()]).await;
    assert_eq!(engine.pending_count(), 2);

    clock.set_ms(T0900);
    engine.tick().await;
    let calls = notifier.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body, "remind 60 minutes before");

    clock.set_ms(T1000);
    engine.tick().await;
    let calls = notifier.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].body, "due now");
    assert_eq!(engine.active_alerts().len(), 2);
}

#[tokio::test]
async fn completing_before_the_first_fire_cancels_both() {
    let (mut engine, notifier, clock) = engine_at(T0800);
    let mut task = scenario_task();
    engine.recover(vec![task.clone()]).await;
    assert_eq!(engine.pending_count(), 2);

    // Done at 08:30, before either reminder fires
    clock.set_ms(T0800 + 30 * MS_PER_MINUTE);
    task.done = true;
    engine.tasks_changed(vec![task]).await;
    assert_eq!(engine.pending_count(), 0);

    clock.set_ms(T1000 + HOUR_MS);
    engine.tick().await;
    assert!(notifier.calls().is_empty());
    assert!(engine.active_alerts().is_empty());
}

#[tokio::test]
async fn repeated_reconciliation_never_duplicates_a_fire() {
    let (mut engine, notifier, clock) = engine_at(T0800);
    let task = scenario_task();
    engine.recover(vec![task.clone()]).await;

    // Task-list churn that doesn't touch this task
    for _ in 0..5 {
        engine.tasks_changed(vec![task.clone()]).await;
    }
    assert_eq!(engine.pending_count(), 2);

    clock.set_ms(T1000);
    engine.tick().await;
    assert_eq!(notifier.calls().len(), 2);
}
