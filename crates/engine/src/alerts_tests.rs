// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn alert(task: &str, fire_at_ms: i64) -> ActiveAlert {
    let task_id = TaskId::new(task);
    ActiveAlert {
        key: ReminderKey::due(&task_id, 0, fire_at_ms),
        task_id,
        title: "title".to_string(),
        label: "due now".to_string(),
        fire_at_ms,
        fired_at_ms: fire_at_ms,
    }
}

#[test]
fn duplicate_key_is_rejected() {
    let mut alerts = ActiveAlerts::new();
    assert!(alerts.insert(alert("t-1", 1_000)));
    assert!(!alerts.insert(alert("t-1", 1_000)));
    assert_eq!(alerts.len(), 1);
}

#[test]
fn remove_resolves_exactly_one_alert() {
    let mut alerts = ActiveAlerts::new();
    let first = alert("t-1", 1_000);
    alerts.insert(first.clone());
    alerts.insert(alert("t-2", 2_000));

    let removed = alerts.remove(&first.key);
    assert_eq!(removed, Some(first.clone()));
    assert!(alerts.remove(&first.key).is_none());
    assert_eq!(alerts.len(), 1);
}

#[test]
fn for_task_collects_every_alert_of_one_task() {
    let mut alerts = ActiveAlerts::new();
    let task_id = TaskId::new("t-1");
    alerts.insert(alert("t-1", 1_000));
    alerts.insert({
        let mut a = alert("t-1", 2_000);
        a.key = ReminderKey::snooze(&task_id, 2_000);
        a
    });
    alerts.insert(alert("t-2", 3_000));

    assert_eq!(alerts.for_task(&task_id).len(), 2);
    assert_eq!(alerts.for_task(&TaskId::new("t-3")).len(), 0);
}

#[test]
fn snooze_alerts_are_distinguishable() {
    let task_id = TaskId::new("t-1");
    let mut snoozed = alert("t-1", 1_000);
    snoozed.key = ReminderKey::snooze(&task_id, 1_000);

    assert!(snoozed.is_snooze());
    assert!(!alert("t-1", 1_000).is_snooze());
}
