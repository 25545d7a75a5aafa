// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Nudge notification relay
//!
//! Server-side deployment of the reminder schedule: clients register a
//! push endpoint, submit keyed schedules, and the relay delivers each
//! payload when its instant arrives. Every endpoint owns an independent
//! schedule; the relay keeps no durable state.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod push;
mod routes;
mod state;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use nudge_core::SystemClock;
use tracing::{info, warn};

use crate::push::{LogPushSender, PushSender};
use crate::state::RelayState;

/// Upper bound on the delivery loop's sleep, so bridged delays advance
/// and drift is caught even when nothing is scheduled soon.
const IDLE_POLL: Duration = Duration::from_secs(60);

#[derive(Parser)]
#[command(name = "nudge-relay", version, about = "Notification relay for nudge clients")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8787")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    use tracing_subscriber::{fmt, prelude::*, EnvFilter};
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    let state = RelayState::new(Arc::new(SystemClock::new()));
    tokio::spawn(delivery_loop(state.clone(), LogPushSender::new()));

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    info!(addr = %listener.local_addr()?, "nudge-relay listening");
    axum::serve(listener, routes::router(state)).await?;
    Ok(())
}

/// Sleep until the next fire instant (woken early when a schedule
/// change moves it), then push everything due.
async fn delivery_loop<P: PushSender>(state: RelayState, sender: P) {
    let wake = state.wake_handle();
    loop {
        let sleep_for = state
            .next_wakeup()
            .map(|wakeup| Duration::from_millis(wakeup.saturating_sub(state.now_ms()).max(0) as u64))
            .unwrap_or(IDLE_POLL)
            .min(IDLE_POLL);

        tokio::select! {
            _ = tokio::time::sleep(sleep_for) => {}
            _ = wake.notified() => {}
        }

        for job in state.poll_due() {
            if let Err(e) = sender.push(&job.endpoint, &job.key, &job.payload).await {
                // Push transport is best-effort; the job is consumed
                warn!(endpoint = %job.endpoint, key = %job.key, error = %e, "push delivery failed");
            }
        }
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
