// ABOUTME: OpenAI-compatible chat completions client that generates meal plans
// ABOUTME: Makes one JSON-mode request per call and classifies every failure by upstream status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI`-Compatible Plan Generator
//!
//! Works with any endpoint that implements the `OpenAI` chat completions API.
//!
//! ## Failure classification
//!
//! | Upstream                               | Failure             |
//! |----------------------------------------|---------------------|
//! | HTTP 429                               | `RateLimited`       |
//! | HTTP 401 / 403, secret lookup failure  | `Unauthorized`      |
//! | HTTP 5xx / 408, connect error, timeout | `TransientError`    |
//! | 2xx with unusable body, other 4xx      | `MalformedResponse` |
//!
//! Exactly one attempt is made per call. The per-call deadline is the HTTP
//! client timeout.

use async_trait::async_trait;
use mealplan_core::models::{GeneratedPlan, MacroTotals, Meal};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

use super::{
    get_nutrition_system_prompt, ChatMessage, GenerationFailure, GenerationOutcome,
    PlanGenerator,
};
use crate::config::LlmConfig;
use crate::secrets::{CachedCredential, SecretProvider};
use mealplan_core::constants::llm::CONNECT_TIMEOUT_SECS;
use mealplan_core::errors::AppError;

/// Longest upstream body excerpt carried in a failure detail
const MAX_DETAIL_CHARS: usize = 200;

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

/// OpenAI-compatible API request structure
#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

/// Message structure for OpenAI-compatible API
#[derive(Debug, Serialize)]
struct OpenAiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ChatMessage> for OpenAiMessage<'a> {
    fn from(msg: &'a ChatMessage) -> Self {
        Self {
            role: msg.role.as_str(),
            content: &msg.content,
        }
    }
}

/// JSON mode selector
#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// OpenAI-compatible API response structure
#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

/// Choice in response
#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

/// Message in response
#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

/// Error response structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

// ============================================================================
// Plan Shape Returned By The Model
// ============================================================================

#[derive(Debug, Deserialize)]
struct RemotePlan {
    meals: Vec<RemoteMeal>,
    #[serde(default)]
    totals: Option<RemoteMacros>,
    #[serde(default)]
    shopping_list: Vec<String>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RemoteMeal {
    name: String,
    #[serde(default)]
    ingredients: Vec<String>,
    macros: RemoteMacros,
    #[serde(default)]
    prep: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RemoteMacros {
    kcal: f64,
    protein: f64,
    #[serde(default)]
    carbs: Option<f64>,
    #[serde(default)]
    fat: Option<f64>,
}

// ============================================================================
// Generator Configuration
// ============================================================================

/// Configuration for the `OpenAI`-compatible generator
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL for the API (e.g., <https://api.openai.com/v1>)
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Per-call deadline
    pub timeout: Duration,
    /// Response token budget
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl From<&LlmConfig> for OpenAiCompatibleConfig {
    fn from(config: &LlmConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            timeout: config.timeout,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

impl Default for OpenAiCompatibleConfig {
    fn default() -> Self {
        Self::from(&LlmConfig::default())
    }
}

// ============================================================================
// Generator Implementation
// ============================================================================

/// Meal plan generator backed by an `OpenAI`-compatible endpoint
pub struct OpenAiCompatibleGenerator {
    client: Client,
    config: OpenAiCompatibleConfig,
    credential: CachedCredential,
}

impl OpenAiCompatibleGenerator {
    /// Create a generator that resolves its API key through `secrets`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        config: OpenAiCompatibleConfig,
        secrets: Arc<dyn SecretProvider>,
        credential_param: impl Into<String>,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(config.timeout))
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            credential: CachedCredential::new(secrets, credential_param),
        })
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    /// Send the request and turn the response into an outcome
    async fn request_plan(&self, api_key: &str, prompt: &str) -> GenerationOutcome {
        let messages = [
            ChatMessage::system(get_nutrition_system_prompt()),
            ChatMessage::user(prompt),
        ];
        let body = OpenAiRequest {
            model: &self.config.model,
            messages: messages.iter().map(OpenAiMessage::from).collect(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let response = self
            .client
            .post(self.api_url("chat/completions"))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        if !status.is_success() {
            return Err(classify_status(status, &text));
        }

        let parsed: OpenAiResponse =
            serde_json::from_str(&text).map_err(|e| GenerationFailure::MalformedResponse {
                detail: format!("completion envelope: {e}"),
            })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GenerationFailure::MalformedResponse {
                detail: "completion has no message content".to_owned(),
            })?;

        parse_plan_content(&content)
    }
}

#[async_trait]
impl PlanGenerator for OpenAiCompatibleGenerator {
    fn name(&self) -> &'static str {
        "openai_compatible"
    }

    #[instrument(skip(self, prompt), fields(model = %self.config.model))]
    async fn generate(&self, prompt: &str) -> GenerationOutcome {
        let api_key = self
            .credential
            .get()
            .await
            .map_err(|e| GenerationFailure::Unauthorized {
                status: None,
                detail: e.to_string(),
            })?;

        let outcome = self.request_plan(api_key, prompt).await;
        match &outcome {
            Ok(plan) => debug!(meals = plan.meals.len(), "Model returned a plan"),
            Err(failure) => debug!(failure = failure.kind(), "Model call failed"),
        }
        outcome
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Classify a non-success HTTP status
fn classify_status(status: StatusCode, body: &str) -> GenerationFailure {
    let detail = format!("HTTP {}: {}", status.as_u16(), error_message(body));

    match status.as_u16() {
        429 => GenerationFailure::RateLimited { detail },
        401 | 403 => GenerationFailure::Unauthorized {
            status: Some(status.as_u16()),
            detail,
        },
        408 | 500..=599 => GenerationFailure::TransientError { detail },
        _ => GenerationFailure::MalformedResponse { detail },
    }
}

/// Classify a network-level failure
fn classify_transport_error(error: &reqwest::Error) -> GenerationFailure {
    let detail = if error.is_timeout() {
        format!("deadline exceeded: {error}")
    } else if error.is_connect() {
        format!("connection failed: {error}")
    } else {
        format!("transport error: {error}")
    };
    GenerationFailure::TransientError { detail }
}

/// Extract the upstream error message, falling back to a body excerpt
fn error_message(body: &str) -> String {
    serde_json::from_str::<OpenAiErrorResponse>(body).map_or_else(
        |_| body.chars().take(MAX_DETAIL_CHARS).collect(),
        |parsed| parsed.error.message,
    )
}

// ============================================================================
// Plan Parsing
// ============================================================================

/// Parse the model's message content into a plan
fn parse_plan_content(content: &str) -> GenerationOutcome {
    let json = strip_code_fence(content);
    let remote: RemotePlan =
        serde_json::from_str(json).map_err(|e| GenerationFailure::MalformedResponse {
            detail: format!("plan body: {e}"),
        })?;

    if remote.meals.is_empty() {
        return Err(GenerationFailure::MalformedResponse {
            detail: "plan has no meals".to_owned(),
        });
    }

    let meals = remote
        .meals
        .into_iter()
        .map(|meal| {
            Ok(Meal {
                calories: grams("kcal", meal.macros.kcal)?,
                protein_g: grams("protein", meal.macros.protein)?,
                carbs_g: meal.macros.carbs.map(|v| grams("carbs", v)).transpose()?,
                fat_g: meal.macros.fat.map(|v| grams("fat", v)).transpose()?,
                name: meal.name,
                ingredients: meal.ingredients,
                prep: meal.prep,
            })
        })
        .collect::<Result<Vec<_>, GenerationFailure>>()?;

    let totals = remote
        .totals
        .map(|t| {
            Ok::<_, GenerationFailure>(MacroTotals {
                kcal: grams("kcal", t.kcal)?,
                protein: grams("protein", t.protein)?,
                carbs: t.carbs.map_or(Ok(0), |v| grams("carbs", v))?,
                fat: t.fat.map_or(Ok(0), |v| grams("fat", v))?,
            })
        })
        .transpose()?;

    Ok(GeneratedPlan {
        meals,
        totals,
        shopping_list: remote.shopping_list,
        notes: remote.notes,
    })
}

/// Round a model-reported quantity, rejecting negative or non-finite values
fn grams(field: &str, value: f64) -> Result<u32, GenerationFailure> {
    if value.is_finite() && (0.0..=f64::from(u32::MAX)).contains(&value) {
        Ok(value.round() as u32)
    } else {
        Err(GenerationFailure::MalformedResponse {
            detail: format!("{field} value {value} is out of range"),
        })
    }
}

/// Models occasionally wrap JSON in a markdown fence even in JSON mode
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map_or(trimmed, str::trim)
}
