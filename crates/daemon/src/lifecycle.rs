// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration and startup errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during daemon startup.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not determine state directory (HOME unset)")]
    NoStateDir,
    #[error("snooze store error: {0}")]
    Store(#[from] nudge_storage::StoreError),
}

/// Daemon configuration.
///
/// One daemon per user; all state lives under a single directory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root state directory (e.g. ~/.local/state/nudge)
    pub state_dir: PathBuf,
    /// Task-list JSON file, written by the tracker app
    pub tasks_path: PathBuf,
    /// Persisted snooze records
    pub snooze_path: PathBuf,
    /// Daemon log file
    pub log_path: PathBuf,
    /// Unix socket receiving alert-action messages
    pub socket_path: PathBuf,
}

impl Config {
    /// Load configuration for the user-level daemon.
    ///
    /// Uses fixed paths under `$XDG_STATE_HOME/nudge/` (falling back to
    /// `~/.local/state/nudge/`).
    pub fn load() -> Result<Self, LifecycleError> {
        Ok(Self::at(state_dir()?))
    }

    /// Configuration rooted at an explicit directory. Tests use this
    /// for isolation.
    pub fn at(state_dir: impl Into<PathBuf>) -> Self {
        let state_dir = state_dir.into();
        Self {
            tasks_path: state_dir.join("tasks.json"),
            snooze_path: state_dir.join("snoozes.json"),
            log_path: state_dir.join("nudged.log"),
            socket_path: state_dir.join("nudged.sock"),
            state_dir,
        }
    }
}

fn state_dir() -> Result<PathBuf, LifecycleError> {
    // NUDGE_STATE_DIR takes priority (used by tests for isolation)
    if let Ok(dir) = std::env::var("NUDGE_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }

    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("nudge"));
    }

    let home = std::env::var("HOME").map_err(|_| LifecycleError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/nudge"))
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
