// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Action messages from fired native alerts.
//!
//! Platform notification-click handlers run outside the process that
//! owns the schedule, so they report user decisions as small JSON
//! messages: `{"type":"action","action":"snooze-5","taskId":"t-1",
//! "timestamp":123}`. The engine processes these exactly like in-UI
//! snooze/dismiss calls.

use crate::task::TaskId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from parsing an incoming action message.
#[derive(Debug, Error)]
pub enum ActionParseError {
    #[error("invalid action message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected message type: {0}")]
    UnexpectedType(String),
    #[error("unknown action: {0}")]
    UnknownAction(String),
}

/// The user's decision, decoded from the wire `action` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertActionKind {
    /// `snooze-<N>`: defer by N minutes.
    Snooze { minutes: u32 },
    /// `dismiss`: drop the alert.
    Dismiss,
}

/// A decoded cross-process alert action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertAction {
    pub task_id: TaskId,
    pub kind: AlertActionKind,
    pub timestamp_ms: i64,
}

#[derive(Deserialize, Serialize)]
struct WireAction {
    #[serde(rename = "type")]
    kind: String,
    action: String,
    #[serde(rename = "taskId")]
    task_id: String,
    #[serde(default)]
    timestamp: i64,
}

impl AlertAction {
    /// Parse an action message from its JSON wire form.
    pub fn from_json(raw: &str) -> Result<Self, ActionParseError> {
        let wire: WireAction = serde_json::from_str(raw)?;
        if wire.kind != "action" {
            return Err(ActionParseError::UnexpectedType(wire.kind));
        }
        let kind = parse_action_str(&wire.action)?;
        Ok(Self {
            task_id: TaskId::new(wire.task_id),
            kind,
            timestamp_ms: wire.timestamp,
        })
    }
}

fn parse_action_str(action: &str) -> Result<AlertActionKind, ActionParseError> {
    if action == "dismiss" {
        return Ok(AlertActionKind::Dismiss);
    }
    if let Some(minutes) = action.strip_prefix("snooze-") {
        let minutes: u32 = minutes
            .parse()
            .map_err(|_| ActionParseError::UnknownAction(action.to_string()))?;
        return Ok(AlertActionKind::Snooze { minutes });
    }
    Err(ActionParseError::UnknownAction(action.to_string()))
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
