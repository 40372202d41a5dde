// ABOUTME: Integration tests for the OpenAI-compatible plan generator against a mock endpoint
// ABOUTME: Validates the wire request and classification of every upstream failure mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::mock_llm::{valid_plan_content, MockLlm, MockReply};
use helpers::stubs::StaticSecrets;
use mealplan_server::llm::{
    GenerationFailure, OpenAiCompatibleConfig, OpenAiCompatibleGenerator, PlanGenerator,
};
use std::sync::Arc;
use std::time::Duration;

fn generator(base_url: &str, secrets: Arc<StaticSecrets>) -> OpenAiCompatibleGenerator {
    let config = OpenAiCompatibleConfig {
        base_url: base_url.to_owned(),
        timeout: Duration::from_millis(500),
        ..OpenAiCompatibleConfig::default()
    };
    OpenAiCompatibleGenerator::new(config, secrets, "OPENAI_API_KEY").unwrap()
}

async fn generate_with(reply: MockReply) -> Result<usize, GenerationFailure> {
    let mock = MockLlm::start(reply).await;
    let result = generator(&mock.base_url, StaticSecrets::with("sk-test"))
        .generate("Build a plan")
        .await;
    assert_eq!(mock.requests().len(), 1, "exactly one attempt");
    result.map(|plan| plan.meals.len())
}

#[tokio::test]
async fn test_valid_response_is_parsed() {
    let meals = generate_with(MockReply::Content(valid_plan_content()))
        .await
        .unwrap();
    assert_eq!(meals, 2);
}

#[tokio::test]
async fn test_request_wire_format() {
    let mock = MockLlm::start(MockReply::Content(valid_plan_content())).await;
    let plan = generator(&mock.base_url, StaticSecrets::with("sk-test"))
        .generate("Build a 1-day meal plan")
        .await
        .unwrap();

    assert_eq!(plan.meals[0].name, "Protein oats");
    assert_eq!(plan.meals[0].carbs_g, Some(110));
    assert_eq!(plan.totals.unwrap().kcal, 2000);

    let sent = mock.requests().pop().unwrap();
    assert_eq!(sent.authorization.as_deref(), Some("Bearer sk-test"));
    assert_eq!(sent.body["model"], "gpt-4o-mini");
    assert_eq!(sent.body["response_format"]["type"], "json_object");
    assert_eq!(sent.body["messages"][0]["role"], "system");
    assert_eq!(sent.body["messages"][1]["role"], "user");
    assert_eq!(sent.body["messages"][1]["content"], "Build a 1-day meal plan");
}

#[tokio::test]
async fn test_429_is_rate_limited() {
    let body = r#"{"error": {"message": "Rate limit reached", "type": "requests"}}"#;
    let failure = generate_with(MockReply::Status(429, body.into()))
        .await
        .unwrap_err();

    assert!(matches!(failure, GenerationFailure::RateLimited { .. }));
    assert!(failure.detail().contains("Rate limit reached"));
}

#[tokio::test]
async fn test_401_and_403_are_unauthorized() {
    for code in [401, 403] {
        let failure = generate_with(MockReply::Status(code, "{}".into()))
            .await
            .unwrap_err();
        assert_eq!(
            failure,
            GenerationFailure::Unauthorized {
                status: Some(code),
                detail: format!("HTTP {code}: {{}}"),
            }
        );
    }
}

#[tokio::test]
async fn test_5xx_is_transient() {
    for code in [500, 502, 503] {
        let failure = generate_with(MockReply::Status(code, "upstream down".into()))
            .await
            .unwrap_err();
        assert!(matches!(failure, GenerationFailure::TransientError { .. }));
    }
}

#[tokio::test]
async fn test_other_4xx_is_malformed() {
    let failure = generate_with(MockReply::Status(400, "bad request".into()))
        .await
        .unwrap_err();
    assert!(matches!(failure, GenerationFailure::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_unparseable_content_is_malformed() {
    for content in ["I'm sorry, I can't do that.", r#"{"meals": []}"#, r#"{"plan": "eat"}"#] {
        let failure = generate_with(MockReply::Content(content.into()))
            .await
            .unwrap_err();
        assert!(
            matches!(failure, GenerationFailure::MalformedResponse { .. }),
            "content: {content}"
        );
    }
}

#[tokio::test]
async fn test_garbage_envelope_is_malformed() {
    let failure = generate_with(MockReply::Status(200, "<html>oops</html>".into()))
        .await
        .unwrap_err();
    assert!(matches!(failure, GenerationFailure::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_deadline_exceeded_is_transient() {
    let failure = generate_with(MockReply::Slow(Duration::from_secs(3)))
        .await
        .unwrap_err();
    assert!(matches!(failure, GenerationFailure::TransientError { .. }));
}

#[tokio::test]
async fn test_connection_refused_is_transient() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let failure = generator(&format!("http://{addr}/v1"), StaticSecrets::with("sk-test"))
        .generate("Build a plan")
        .await
        .unwrap_err();
    assert!(matches!(failure, GenerationFailure::TransientError { .. }));
}

#[tokio::test]
async fn test_missing_credential_is_unauthorized_without_a_call() {
    let mock = MockLlm::start(MockReply::Content(valid_plan_content())).await;

    let failure = generator(&mock.base_url, StaticSecrets::empty())
        .generate("Build a plan")
        .await
        .unwrap_err();

    assert!(matches!(
        failure,
        GenerationFailure::Unauthorized { status: None, .. }
    ));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_credential_is_fetched_once() {
    let mock = MockLlm::start(MockReply::Content(valid_plan_content())).await;
    let secrets = StaticSecrets::with("sk-test");
    let generator = generator(&mock.base_url, Arc::clone(&secrets));

    for _ in 0..3 {
        generator.generate("Build a plan").await.unwrap();
    }

    assert_eq!(secrets.lookups(), 1);
    assert_eq!(mock.requests().len(), 3);
}

#[tokio::test]
async fn test_failed_credential_lookup_is_retried_next_call() {
    let mock = MockLlm::start(MockReply::Content(valid_plan_content())).await;
    let secrets = StaticSecrets::empty();
    let generator = generator(&mock.base_url, Arc::clone(&secrets));

    assert!(generator.generate("Build a plan").await.is_err());
    secrets.set("sk-late");
    assert!(generator.generate("Build a plan").await.is_ok());

    assert_eq!(secrets.lookups(), 2);
    assert_eq!(
        mock.requests()[0].authorization.as_deref(),
        Some("Bearer sk-late")
    );
}
