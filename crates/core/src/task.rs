// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task types consumed by the reminder engine.
//!
//! Tasks are owned by the external CRUD layer; the engine reads them to
//! derive reminder schedules and never writes them back.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque stable identifier for a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub String);

impl TaskId {
    /// Create a new TaskId from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string value of this TaskId.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for TaskId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TaskId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Borrow<str> for TaskId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A todo item, as seen by the reminder engine.
///
/// `reminders` holds lead times in minutes before `due_at_ms`; a lead of
/// zero means "alert at the due instant".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub done: bool,
    /// Absolute due instant, epoch milliseconds. `None` means undated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at_ms: Option<i64>,
    /// Lead minutes before due at which to alert.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reminders: Vec<u32>,
}

impl Task {
    /// Create a task with no due date and no reminders.
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            done: false,
            due_at_ms: None,
            reminders: Vec::new(),
        }
    }

    /// Builder-style due instant.
    pub fn with_due(mut self, due_at_ms: i64) -> Self {
        self.due_at_ms = Some(due_at_ms);
        self
    }

    /// Builder-style reminder lead times (minutes before due).
    pub fn with_reminders(mut self, leads: impl Into<Vec<u32>>) -> Self {
        self.reminders = leads.into();
        self
    }

    /// Builder-style completion flag.
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
