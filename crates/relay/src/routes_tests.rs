// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use nudge_core::FakeClock;
use serde_json::json;
use std::sync::Arc;

fn state_at(now_ms: i64) -> RelayState {
    RelayState::new(Arc::new(FakeClock::at(now_ms)))
}

async fn status_and_body(resp: impl IntoResponse) -> (StatusCode, Value) {
    let resp = resp.into_response();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn subscribe_registers_once() {
    let state = state_at(0);

    let req = SubscribeRequest {
        endpoint: "ep-1".to_string(),
    };
    let (status, body) = status_and_body(subscribe(State(state.clone()), Json(req)).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["registered"], json!(true));

    let req = SubscribeRequest {
        endpoint: "ep-1".to_string(),
    };
    let (status, body) = status_and_body(subscribe(State(state), Json(req)).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["registered"], json!(false));
}

#[tokio::test]
async fn subscribe_rejects_an_empty_endpoint() {
    let state = state_at(0);
    let req = SubscribeRequest {
        endpoint: "  ".to_string(),
    };
    let (status, _body) = status_and_body(subscribe(State(state), Json(req)).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn schedule_for_unknown_endpoint_is_404() {
    let state = state_at(0);
    let req = ScheduleRequest {
        endpoint: "ep-missing".to_string(),
        schedules: vec![WireScheduleItem {
            key: "k-1".to_string(),
            when_ms: 5_000,
            payload: json!({}),
        }],
    };
    let (status, body) = status_and_body(schedule(State(state), Json(req)).await).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("unknown endpoint"));
}

#[tokio::test]
async fn invalid_batch_returns_per_item_errors_and_schedules_nothing() {
    let state = state_at(10_000);
    state.subscribe("ep-1");

    let req = ScheduleRequest {
        endpoint: "ep-1".to_string(),
        schedules: vec![
            WireScheduleItem {
                key: "k-good".to_string(),
                when_ms: 20_000,
                payload: json!({}),
            },
            WireScheduleItem {
                key: "k-past".to_string(),
                when_ms: 1_000,
                payload: json!({}),
            },
        ],
    };
    let (status, body) = status_and_body(schedule(State(state.clone()), Json(req)).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["items"][0]["key"], json!("k-past"));
    assert_eq!(body["items"][0]["index"], json!(1));
    assert_eq!(state.pending_count("ep-1"), Some(0));
}

#[tokio::test]
async fn valid_batch_reports_the_scheduled_count() {
    let state = state_at(10_000);
    state.subscribe("ep-1");

    let req = ScheduleRequest {
        endpoint: "ep-1".to_string(),
        schedules: vec![
            WireScheduleItem {
                key: "k-1".to_string(),
                when_ms: 20_000,
                payload: json!({"title": "a"}),
            },
            WireScheduleItem {
                key: "k-2".to_string(),
                when_ms: 30_000,
                payload: json!({"title": "b"}),
            },
        ],
    };
    let (status, body) = status_and_body(schedule(State(state.clone()), Json(req)).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scheduled"], json!(2));
    assert_eq!(state.pending_count("ep-1"), Some(2));
}

#[tokio::test]
async fn cancel_reports_whether_anything_was_pending() {
    let state = state_at(0);
    state.subscribe("ep-1");
    state
        .schedule(
            "ep-1",
            vec![crate::state::ScheduleItem {
                key: "k-1".to_string(),
                when_ms: 5_000,
                payload: json!({}),
            }],
        )
        .unwrap();

    let req = CancelRequest {
        endpoint: "ep-1".to_string(),
        key: "k-1".to_string(),
    };
    let (status, body) = status_and_body(cancel(State(state.clone()), Json(req)).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cancelled"], json!(true));

    let req = CancelRequest {
        endpoint: "ep-missing".to_string(),
        key: "k-1".to_string(),
    };
    let (status, _body) = status_and_body(cancel(State(state), Json(req)).await).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
