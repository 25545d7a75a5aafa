// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only task-list contract.
//!
//! The task list is owned by the external CRUD layer, which writes it
//! as a JSON array. The reminder engine only reads it; a missing file
//! means "no tasks yet". Corrupt content is an error so the caller can
//! keep its previous list instead of silently dropping every schedule.

use crate::StoreError;
use nudge_core::Task;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load the task list from a JSON file.
///
/// Returns an empty list when the file does not exist.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
