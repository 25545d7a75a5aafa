// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted snooze records.
//!
//! Snoozes are the only schedule state that survives a restart: timer
//! handles are process-local, but a user-deferred alert must come back
//! after a reload. The store is deliberately tiny — get-all, put,
//! delete — and every consumer treats read failures as empty state
//! (fail open, lose snoozes rather than crash).

use chrono::{DateTime, Utc};
use nudge_core::{ReminderKey, TaskId};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur in snooze store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A durable record of a user-deferred alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnoozeRecord {
    /// Snooze-tagged reminder key.
    pub key: ReminderKey,
    /// Owning task.
    pub task_id: TaskId,
    /// Absolute fire instant, epoch milliseconds.
    pub fire_at_ms: i64,
    /// When the user snoozed.
    pub created_at: DateTime<Utc>,
}

impl SnoozeRecord {
    pub fn new(key: ReminderKey, task_id: TaskId, fire_at_ms: i64) -> Self {
        Self {
            key,
            task_id,
            fire_at_ms,
            created_at: Utc::now(),
        }
    }
}

/// Persistent store for snooze records.
///
/// Implementations must tolerate being entirely empty or unavailable.
pub trait SnoozeStore: Send + 'static {
    /// Load every record. Missing backing state is an empty list.
    fn load_all(&self) -> Result<Vec<SnoozeRecord>, StoreError>;
    /// Insert or replace a record by key.
    fn put(&mut self, record: SnoozeRecord) -> Result<(), StoreError>;
    /// Delete a record by key. Deleting an absent key is a no-op.
    fn delete(&mut self, key: &ReminderKey) -> Result<(), StoreError>;
}

/// JSON-file-backed snooze store.
///
/// Saves atomically (write to .tmp, fsync, rename) so a crash during
/// save never corrupts the file. A corrupt file on load is rotated to
/// `.bak` and treated as empty.
pub struct FileSnoozeStore {
    path: PathBuf,
    records: BTreeMap<String, SnoozeRecord>,
}

impl FileSnoozeStore {
    /// Open the store at `path`, loading existing records.
    ///
    /// A missing file is an empty store. A corrupt file is moved aside
    /// and the store starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = match load_records(&path)? {
            Some(list) => list
                .into_iter()
                .map(|r| (r.key.as_str().to_string(), r))
                .collect(),
            None => BTreeMap::new(),
        };
        Ok(Self { path, records })
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            let list: Vec<&SnoozeRecord> = self.records.values().collect();
            serde_json::to_writer(&mut writer, &list)?;
            let file = writer.into_inner().map_err(|e| e.into_error())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl SnoozeStore for FileSnoozeStore {
    fn load_all(&self) -> Result<Vec<SnoozeRecord>, StoreError> {
        Ok(self.records.values().cloned().collect())
    }

    fn put(&mut self, record: SnoozeRecord) -> Result<(), StoreError> {
        self.records
            .insert(record.key.as_str().to_string(), record);
        self.save()
    }

    fn delete(&mut self, key: &ReminderKey) -> Result<(), StoreError> {
        if self.records.remove(key.as_str()).is_some() {
            self.save()?;
        }
        Ok(())
    }
}

/// Load records if the file exists.
///
/// Returns `Ok(None)` if the file doesn't exist or is corrupt. Corrupt
/// files are moved to a `.bak` so a later inspection can recover them.
fn load_records(path: &Path) -> Result<Option<Vec<SnoozeRecord>>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    match serde_json::from_reader(reader) {
        Ok(records) => Ok(Some(records)),
        Err(e) => {
            let bak_path = rotate_bak_path(path);
            warn!(
                error = %e,
                path = %path.display(),
                bak = %bak_path.display(),
                "Corrupt snooze store, moving to .bak and starting empty",
            );
            fs::rename(path, &bak_path)?;
            Ok(None)
        }
    }
}

const MAX_BAK_FILES: u32 = 3;

/// Pick the next `.bak` / `.bak.N` path, rotating older backups out.
///
/// Keeps up to [`MAX_BAK_FILES`] backups: `.bak`, `.bak.2`, `.bak.3`.
/// The oldest backup is removed when the limit is reached.
fn rotate_bak_path(path: &Path) -> PathBuf {
    let bak = |n: u32| {
        if n == 1 {
            path.with_extension("bak")
        } else {
            path.with_extension(format!("bak.{n}"))
        }
    };

    let oldest = bak(MAX_BAK_FILES);
    if oldest.exists() {
        let _ = fs::remove_file(&oldest);
    }
    for n in (1..MAX_BAK_FILES).rev() {
        let src = bak(n);
        if src.exists() {
            let _ = fs::rename(&src, bak(n + 1));
        }
    }

    bak(1)
}

/// In-memory snooze store for tests and the relay (which keeps no
/// durable client state).
#[derive(Clone, Default)]
pub struct MemorySnoozeStore {
    records: Arc<Mutex<BTreeMap<String, SnoozeRecord>>>,
}

impl MemorySnoozeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnoozeStore for MemorySnoozeStore {
    fn load_all(&self) -> Result<Vec<SnoozeRecord>, StoreError> {
        Ok(self.records.lock().values().cloned().collect())
    }

    fn put(&mut self, record: SnoozeRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .insert(record.key.as_str().to_string(), record);
        Ok(())
    }

    fn delete(&mut self, key: &ReminderKey) -> Result<(), StoreError> {
        self.records.lock().remove(key.as_str());
        Ok(())
    }
}

#[cfg(test)]
#[path = "snooze_tests.rs"]
mod tests;
