// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::push::FakePushSender;
use crate::state::ScheduleItem;
use nudge_core::FakeClock;
use serde_json::json;

#[tokio::test]
async fn delivery_loop_pushes_due_jobs() {
    let clock = FakeClock::at(1_000);
    let state = RelayState::new(Arc::new(clock.clone()));
    let sender = FakePushSender::new();
    tokio::spawn(delivery_loop(state.clone(), sender.clone()));

    state.subscribe("ep-1");
    state
        .schedule(
            "ep-1",
            vec![ScheduleItem {
                key: "k-1".to_string(),
                when_ms: 2_000,
                payload: json!({"title": "standup"}),
            }],
        )
        .unwrap();

    // Advance past the fire instant, then let the loop's wake fire
    clock.advance_ms(5_000);
    state.wake_handle().notify_one();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let pushes = sender.pushes();
    assert_eq!(pushes.len(), 1);
    assert_eq!(pushes[0].0, "ep-1");
    assert_eq!(pushes[0].1, "k-1");
    assert_eq!(pushes[0].2, json!({"title": "standup"}));
    assert_eq!(state.pending_count("ep-1"), Some(0));
}
