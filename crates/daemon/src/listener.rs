// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unix socket listener for cross-process alert actions.
//!
//! Platform notification click handlers run in short-lived helper
//! processes; each connects, writes one JSON action message per line,
//! and disconnects. The listener decodes lines into [`AlertAction`]s
//! and forwards them to the engine loop. Malformed lines are logged and
//! dropped — a bad helper must not wedge the daemon.

use nudge_core::AlertAction;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub struct ActionListener {
    listener: UnixListener,
    tx: mpsc::Sender<AlertAction>,
}

impl ActionListener {
    /// Bind the action socket, replacing a stale socket file from a
    /// previous run.
    pub fn bind(path: &Path, tx: mpsc::Sender<AlertAction>) -> std::io::Result<Self> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        let listener = UnixListener::bind(path)?;
        Ok(Self { listener, tx })
    }

    pub async fn run(self) {
        loop {
            match self.listener.accept().await {
                Ok((stream, _addr)) => {
                    let tx = self.tx.clone();
                    tokio::spawn(handle_connection(stream, tx));
                }
                Err(e) => {
                    warn!(error = %e, "failed to accept action connection");
                }
            }
        }
    }
}

async fn handle_connection(stream: UnixStream, tx: mpsc::Sender<AlertAction>) {
    let mut lines = BufReader::new(stream).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match AlertAction::from_json(line) {
                    Ok(action) => {
                        debug!(task_id = %action.task_id, "received alert action");
                        if tx.send(action).await.is_err() {
                            return; // engine loop gone, daemon is shutting down
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "dropping malformed action message");
                    }
                }
            }
            Ok(None) => return,
            Err(e) => {
                warn!(error = %e, "action connection read failed");
                return;
            }
        }
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
