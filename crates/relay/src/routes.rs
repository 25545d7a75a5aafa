// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP surface of the relay.
//!
//! All three endpoints take JSON bodies and return JSON. Scheduling
//! against an endpoint that never subscribed is a 404; a batch with any
//! invalid item is a 400 carrying per-item errors and schedules
//! nothing.

use crate::state::{RelayError, RelayState, ScheduleItem};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;

pub fn router(state: RelayState) -> Router {
    Router::new()
        .route("/api/subscribe", post(subscribe))
        .route("/api/schedule", post(schedule))
        .route("/api/schedule/cancel", post(cancel))
        .with_state(state)
}

#[derive(Deserialize)]
struct SubscribeRequest {
    endpoint: String,
}

#[derive(Deserialize)]
struct WireScheduleItem {
    #[serde(default)]
    key: String,
    #[serde(rename = "whenMs")]
    when_ms: i64,
    #[serde(default)]
    payload: Value,
}

#[derive(Deserialize)]
struct ScheduleRequest {
    endpoint: String,
    schedules: Vec<WireScheduleItem>,
}

#[derive(Deserialize)]
struct CancelRequest {
    endpoint: String,
    key: String,
}

async fn subscribe(
    State(state): State<RelayState>,
    Json(body): Json<SubscribeRequest>,
) -> impl IntoResponse {
    if body.endpoint.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "endpoint must not be empty"})),
        );
    }
    let registered = state.subscribe(&body.endpoint);
    (
        StatusCode::OK,
        Json(serde_json::json!({"registered": registered})),
    )
}

async fn schedule(
    State(state): State<RelayState>,
    Json(body): Json<ScheduleRequest>,
) -> impl IntoResponse {
    let items: Vec<ScheduleItem> = body
        .schedules
        .into_iter()
        .map(|item| ScheduleItem {
            key: item.key,
            when_ms: item.when_ms,
            payload: item.payload,
        })
        .collect();

    match state.schedule(&body.endpoint, items) {
        Ok(scheduled) => (
            StatusCode::OK,
            Json(serde_json::json!({"scheduled": scheduled})),
        ),
        Err(e) => relay_error_response(e),
    }
}

async fn cancel(
    State(state): State<RelayState>,
    Json(body): Json<CancelRequest>,
) -> impl IntoResponse {
    match state.cancel(&body.endpoint, &body.key) {
        Ok(cancelled) => (
            StatusCode::OK,
            Json(serde_json::json!({"cancelled": cancelled})),
        ),
        Err(e) => relay_error_response(e),
    }
}

fn relay_error_response(error: RelayError) -> (StatusCode, Json<Value>) {
    match error {
        RelayError::UnknownEndpoint(endpoint) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "unknown endpoint", "endpoint": endpoint})),
        ),
        RelayError::InvalidItems(items) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "invalid schedule items", "items": items})),
        ),
    }
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
