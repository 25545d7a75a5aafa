// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Nudge daemon (nudged)
//!
//! Background process that owns the reminder schedule for one user:
//! watches the task file, keeps the schedule reconciled, sleeps until
//! the next fire instant, and delivers alerts.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod lifecycle;
mod listener;
mod watch;

use std::time::Duration;

use nudge_adapters::{DesktopNotifyAdapter, TieredNotifyAdapter, ToastNotifyAdapter};
use nudge_core::{Clock, SystemClock, Task};
use nudge_engine::{ReminderEngine, RECONCILE_INTERVAL};
use nudge_storage::{load_tasks, FileSnoozeStore};
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::lifecycle::{Config, LifecycleError};
use crate::listener::ActionListener;

/// Settle time after a task-file change before reloading, so a burst of
/// writes from one save coalesces into one reload.
const RELOAD_DEBOUNCE: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle info flags before touching any state
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("nudged {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("nudged {}", env!("CARGO_PKG_VERSION"));
                println!("Nudge daemon - schedules and delivers task reminders");
                println!();
                println!("USAGE:");
                println!("    nudged");
                println!();
                println!("Reads the task list from the tracker's state directory and");
                println!("listens on a Unix socket for notification-action messages.");
                println!();
                println!("OPTIONS:");
                println!("    -h, --help       Print help information");
                println!("    -v, --version    Print version information");
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("Usage: nudged [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let config = Config::load()?;
    std::fs::create_dir_all(&config.state_dir)?;
    let _log_guard = setup_logging(&config)?;

    info!("starting nudged");
    run(config).await?;
    info!("nudged stopped");
    Ok(())
}

async fn run(config: Config) -> Result<(), LifecycleError> {
    let store = FileSnoozeStore::open(&config.snooze_path)?;
    info!(
        snoozes = store.len(),
        path = %config.snooze_path.display(),
        "opened snooze store"
    );

    // Desktop first, in-app toast as the tier of last resort. The
    // daemon has no UI, so toasts land in the log.
    let (toast, mut toast_rx) = ToastNotifyAdapter::new();
    let notifier = TieredNotifyAdapter::new(DesktopNotifyAdapter::new(), toast);
    tokio::spawn(async move {
        while let Some(toast) = toast_rx.recv().await {
            info!(title = %toast.title, body = %toast.body, tag = %toast.tag, "toast alert");
        }
    });

    let clock = SystemClock::new();
    let mut engine = ReminderEngine::new(notifier, store, clock);

    let mut tasks = load_initial_tasks(&config);
    engine.recover(tasks.clone()).await;

    // Action socket for notification click handlers
    let (action_tx, mut action_rx) = mpsc::channel(64);
    let action_listener = ActionListener::bind(&config.socket_path, action_tx)?;
    tokio::spawn(action_listener.run());

    // Task-file watch; the watcher handle must outlive the loop
    let (watch_tx, mut watch_rx) = mpsc::channel(16);
    let _watcher = match watch::watch_tasks(&config.tasks_path, watch_tx) {
        Ok(w) => Some(w),
        Err(e) => {
            // Degrade to the periodic tick; edits show up within 60s
            warn!(error = %e, "task-file watch unavailable, relying on periodic reconcile");
            None
        }
    };

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    info!(socket = %config.socket_path.display(), "nudged ready");

    loop {
        // Sleep until the earliest armed instant, bounded by the
        // reconcile interval so drift and bridge hops are serviced.
        let now_ms = clock.now_ms();
        let until_fire = engine
            .next_wakeup()
            .map(|wakeup| Duration::from_millis(wakeup.saturating_sub(now_ms).max(0) as u64))
            .unwrap_or(RECONCILE_INTERVAL);
        let sleep_for = until_fire.min(RECONCILE_INTERVAL);

        tokio::select! {
            _ = tokio::time::sleep(sleep_for) => {
                engine.tick().await;
            }

            Some(()) = watch_rx.recv() => {
                tokio::time::sleep(RELOAD_DEBOUNCE).await;
                while watch_rx.try_recv().is_ok() {}
                match load_tasks(&config.tasks_path) {
                    Ok(loaded) => {
                        info!(tasks = loaded.len(), "task list changed, reconciling");
                        tasks = loaded;
                        engine.tasks_changed(tasks.clone()).await;
                    }
                    Err(e) => {
                        // Keep scheduling against the last good list
                        warn!(error = %e, "task list unreadable, keeping previous");
                    }
                }
            }

            Some(action) = action_rx.recv() => {
                engine.handle_action(&action);
            }

            _ = sigterm.recv() => {
                info!("received SIGTERM, shutting down");
                break;
            }

            _ = sigint.recv() => {
                info!("received SIGINT, shutting down");
                break;
            }
        }

        for event in engine.drain_events() {
            info!(event = %event.log_summary(), "reminder event");
        }
    }

    // Armed delays are process-local; persisted snoozes come back on
    // the next startup.
    engine.shutdown();
    Ok(())
}

fn load_initial_tasks(config: &Config) -> Vec<Task> {
    match load_tasks(&config.tasks_path) {
        Ok(tasks) => {
            info!(tasks = tasks.len(), path = %config.tasks_path.display(), "loaded task list");
            tasks
        }
        Err(e) => {
            warn!(error = %e, "task list unreadable at startup, starting empty");
            Vec::new()
        }
    }
}

fn setup_logging(
    config: &Config,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = tracing_appender::rolling::never(
        config.log_path.parent().ok_or(LifecycleError::NoStateDir)?,
        config
            .log_path
            .file_name()
            .ok_or(LifecycleError::NoStateDir)?,
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}
