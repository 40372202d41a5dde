// ABOUTME: In-process mock of an OpenAI-compatible chat completions endpoint
// ABOUTME: Serves scripted responses and records what the client sent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// Scripted reply for every request
#[derive(Clone)]
pub enum MockReply {
    /// Status and raw body
    Status(u16, String),
    /// 200 with the given message content inside a completion envelope
    Content(String),
    /// Sleep before answering 200 with a valid plan
    Slow(Duration),
}

/// What the client sent
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    reply: MockReply,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Running mock endpoint
pub struct MockLlm {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockLlm {
    /// Start a mock on an ephemeral port
    pub async fn start(reply: MockReply) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            reply,
            requests: Arc::clone(&requests),
        };
        let app = Router::new()
            .route("/v1/chat/completions", post(handle_completion))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/v1"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Message content of a valid two-meal plan
pub fn valid_plan_content() -> String {
    json!({
        "meals": [
            {
                "name": "Protein oats",
                "ingredients": ["oats (80g)", "whey (30g)"],
                "macros": {"kcal": 950, "protein": 95, "carbs": 110, "fat": 12},
                "prep": "Cook oats, stir in whey."
            },
            {
                "name": "Steak and rice",
                "ingredients": ["sirloin (250g)", "rice (200g)"],
                "macros": {"kcal": 1050, "protein": 105, "carbs": 90, "fat": 28}
            }
        ],
        "totals": {"kcal": 2000, "protein": 200, "carbs": 200, "fat": 40},
        "shopping_list": ["oats", "whey", "sirloin", "rice"],
        "notes": "Hydrate."
    })
    .to_string()
}

fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

async fn handle_completion(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.requests.lock().unwrap().push(RecordedRequest {
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        body,
    });

    match state.reply {
        MockReply::Status(code, body) => (
            StatusCode::from_u16(code).unwrap(),
            [("content-type", "application/json")],
            body,
        )
            .into_response(),
        MockReply::Content(content) => Json(completion(&content)).into_response(),
        MockReply::Slow(delay) => {
            tokio::time::sleep(delay).await;
            Json(completion(&valid_plan_content())).into_response()
        }
    }
}
