// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task-file change watch.
//!
//! The tracker app owns the task list and rewrites it atomically
//! (write-then-rename), so the watch covers the parent directory rather
//! than the file itself — a rename would otherwise drop the watch.

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use tokio::sync::mpsc;

/// Start watching the task file, signalling `tx` on every create,
/// modify, or rename that touches it. The returned watcher must be kept
/// alive for the watch to stay active.
pub fn watch_tasks(
    path: &Path,
    tx: mpsc::Sender<()>,
) -> Result<RecommendedWatcher, notify::Error> {
    let file_name = path.file_name().map(|n| n.to_os_string());
    let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
        let Ok(event) = res else {
            return;
        };
        if !matches!(
            event.kind,
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
        ) {
            return;
        }
        let touches_tasks = event
            .paths
            .iter()
            .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
        if touches_tasks {
            let _ = tx.blocking_send(());
        }
    })?;

    let watch_dir = path.parent().unwrap_or(path);
    watcher.watch(watch_dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}
