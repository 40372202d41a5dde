// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Service names, routes, defaults, and telemetry event identifiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! flat namespace.

/// Service identity
pub mod service_names {
    /// Service name used in structured logs
    pub const MEALPLAN_SERVER: &str = "mealplan-server";
}

/// API routes
pub mod routes {
    /// Plan generation route
    pub const GENERATE: &str = "/generate";
    /// Health route
    pub const HEALTH: &str = "/health";
    /// Readiness route
    pub const READY: &str = "/ready";
}

/// Network defaults
pub mod network {
    /// Default bind host
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
    /// Outer timeout applied to every HTTP request
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Maximum accepted request body size
    pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024;
}

/// Language-model endpoint defaults
pub mod llm {
    /// Default OpenAI-compatible base URL
    pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
    /// Small and cheap model
    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
    /// Per-call deadline for the remote generation request
    pub const DEFAULT_TIMEOUT_SECS: u64 = 12;
    /// Connect timeout for the remote generation request
    pub const CONNECT_TIMEOUT_SECS: u64 = 5;
    /// Response token budget
    pub const DEFAULT_MAX_TOKENS: u32 = 1200;
    /// Sampling temperature
    pub const DEFAULT_TEMPERATURE: f32 = 0.4;
    /// Default name of the credential parameter
    pub const DEFAULT_CREDENTIAL_PARAM: &str = "OPENAI_API_KEY";
}

/// Plan store defaults
pub mod storage {
    /// Default `SQLite` database location
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/mealplans.db";
}

/// Structured telemetry event names
///
/// Emitted as the `event` field of tracing events so that operators can alert
/// on misconfiguration separately from expected load shedding.
pub mod telemetry {
    /// Tracing target for telemetry events
    pub const TARGET: &str = "mealplan::telemetry";
    /// Upstream refused or timed out; fallback served
    pub const FALLBACK_LOAD_SHEDDING: &str = "llm.fallback.load_shedding";
    /// Credential or contract defect; fallback served
    pub const FALLBACK_MISCONFIGURATION: &str = "llm.fallback.misconfiguration";
    /// Remote plan served
    pub const PLAN_GENERATED: &str = "llm.plan.generated";
    /// Best-effort store write failed
    pub const STORE_WRITE_FAILED: &str = "plan_store.write_failed";
    /// Process-local store selected; records are unbounded and lost on restart
    pub const STORE_EPHEMERAL: &str = "plan_store.ephemeral";
    /// Resolved plan was unusable
    pub const PLAN_UNAVAILABLE: &str = "plan.unavailable";
}

/// Fallback plan synthesis parameters
pub mod fallback {
    /// Share of daily targets per meal, in percent (breakfast, lunch, dinner)
    pub const MEAL_SHARES_PERCENT: [u32; 3] = [25, 35, 40];
    /// Percent of non-protein calories assigned to carbohydrates
    pub const CARB_SHARE_PERCENT: u32 = 70;
    /// Energy density of protein and carbohydrate
    pub const KCAL_PER_GRAM_PROTEIN_OR_CARB: u32 = 4;
    /// Energy density of fat
    pub const KCAL_PER_GRAM_FAT: u32 = 9;
}
