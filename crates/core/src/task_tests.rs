// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn task_id_string_conversions() {
    let id = TaskId::new("t-1");
    assert_eq!(id.as_str(), "t-1");
    assert_eq!(id.to_string(), "t-1");
    assert_eq!(id, "t-1");
    assert_eq!(TaskId::from("t-1"), TaskId::from("t-1".to_string()));
}

#[test]
fn task_builder_sets_fields() {
    let task = Task::new("t-1", "water plants")
        .with_due(1_000_000)
        .with_reminders(vec![60, 0])
        .with_done(false);
    assert_eq!(task.due_at_ms, Some(1_000_000));
    assert_eq!(task.reminders, vec![60, 0]);
    assert!(!task.done);
}

#[test]
fn task_serde_round_trip() {
    let task = Task::new("t-2", "file taxes").with_due(42).with_reminders(vec![15]);
    let json = serde_json::to_string(&task).unwrap();
    let back: Task = serde_json::from_str(&json).unwrap();
    assert_eq!(back, task);
}

#[test]
fn task_deserializes_with_missing_optional_fields() {
    let task: Task = serde_json::from_str(r#"{"id":"t-3"}"#).unwrap();
    assert_eq!(task.id, "t-3");
    assert!(task.title.is_empty());
    assert!(!task.done);
    assert!(task.due_at_ms.is_none());
    assert!(task.reminders.is_empty());
}
