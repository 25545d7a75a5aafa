// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the reminder engine

use nudge_core::ReminderKey;
use thiserror::Error;

/// Errors that can occur in the reminder engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("alert not active: {0}")]
    AlertNotActive(ReminderKey),
}
