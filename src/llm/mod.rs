// ABOUTME: Language-model client abstraction for meal plan generation
// ABOUTME: Defines chat message types, the classified generation outcome, and the generator trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Generation Interface
//!
//! A [`PlanGenerator`] turns a prompt into a [`GenerationOutcome`]: either a
//! parsed [`GeneratedPlan`] or a [`GenerationFailure`] classified by what went
//! wrong upstream. Generators never retry; exactly one remote attempt is made
//! per call, and every failure is returned as a value rather than raised.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mealplan_server::llm::{GenerationFailure, PlanGenerator};
//!
//! async fn example(generator: &dyn PlanGenerator) {
//!     match generator.generate("Build a 1-day meal plan at about 2000 kcal").await {
//!         Ok(plan) => println!("{} meals", plan.meals.len()),
//!         Err(GenerationFailure::RateLimited { .. }) => println!("slow down"),
//!         Err(other) => println!("failed: {other}"),
//!     }
//! }
//! ```

mod openai_compatible;
pub mod prompts;

pub use openai_compatible::{OpenAiCompatibleConfig, OpenAiCompatibleGenerator};
pub use prompts::{build_plan_prompt, get_nutrition_system_prompt};

use async_trait::async_trait;
use mealplan_core::models::GeneratedPlan;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
}

impl MessageRole {
    /// Convert to string representation for API calls
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// A single message in a chat conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

// ============================================================================
// Outcome Types
// ============================================================================

/// Why a generation attempt produced no plan
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationFailure {
    /// Endpoint answered HTTP 429
    #[error("model endpoint rate limited the request: {detail}")]
    RateLimited {
        /// Upstream message
        detail: String,
    },
    /// Credential missing or rejected (HTTP 401/403, or secret lookup failed)
    #[error("model endpoint credential rejected or unavailable: {detail}")]
    Unauthorized {
        /// HTTP status when the endpoint rejected the credential
        status: Option<u16>,
        /// Upstream or secret-provider message
        detail: String,
    },
    /// HTTP 5xx, network failure, or deadline exceeded
    #[error("model endpoint temporarily unavailable: {detail}")]
    TransientError {
        /// Network or upstream message
        detail: String,
    },
    /// Endpoint answered but the body is not a usable plan
    #[error("model response is not a valid meal plan: {detail}")]
    MalformedResponse {
        /// Parse failure description
        detail: String,
    },
}

impl GenerationFailure {
    /// Stable identifier for logs and metrics
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::RateLimited { .. } => "rate_limited",
            Self::Unauthorized { .. } => "unauthorized",
            Self::TransientError { .. } => "transient_error",
            Self::MalformedResponse { .. } => "malformed_response",
        }
    }

    /// Whether the failure indicates a deployment defect rather than load
    #[must_use]
    pub const fn is_misconfiguration(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. } | Self::MalformedResponse { .. }
        )
    }

    /// Human-readable detail
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::RateLimited { detail }
            | Self::Unauthorized { detail, .. }
            | Self::TransientError { detail }
            | Self::MalformedResponse { detail } => detail,
        }
    }
}

/// Result of a single generation attempt
pub type GenerationOutcome = Result<GeneratedPlan, GenerationFailure>;

// ============================================================================
// Generator Trait
// ============================================================================

/// Remote meal plan generator
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// Provider identifier for logging
    fn name(&self) -> &'static str;

    /// Make exactly one generation attempt for `prompt`
    async fn generate(&self, prompt: &str) -> GenerationOutcome;
}
