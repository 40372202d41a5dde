// ABOUTME: Main library entry point for the meal plan generation server
// ABOUTME: Exposes configuration, generation, fallback, persistence, and HTTP routing modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Meal Plan Server
//!
//! HTTP service that turns daily calorie, protein, preference and budget
//! targets into a one-day meal plan using an `OpenAI`-compatible model.
//!
//! Each `POST /generate` request makes exactly one model call. When the call
//! fails (rate limiting, rejected credentials, outages, unusable output) a
//! deterministic plan scaled to the targets is returned instead, and the
//! response says which source produced it. Every served plan is persisted as
//! a write-once record on a best-effort basis.
//!
//! ## Architecture
//!
//! - **`validation`**: strict body parsing into `MealPlanRequest`
//! - **`llm`**: prompt building and the classified model client
//! - **`fallback`**: outcome resolution and the deterministic plan
//! - **`store`**: write-once plan persistence (`SQLite`, in-memory)
//! - **`secrets`**: credential lookup with a process-lifetime cache
//! - **`service`** / **`routes`** / **`server`**: request orchestration and HTTP
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use mealplan_server::config::ServerConfig;
//! use mealplan_server::server::MealPlanServer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     MealPlanServer::from_config(config).await?.run().await
//! }
//! ```

/// Environment-driven server configuration
pub mod config;
/// Deterministic fallback plan and outcome resolution
pub mod fallback;
/// Language-model client and prompts
pub mod llm;
/// Logging setup and telemetry events
pub mod logging;
/// HTTP routes and middleware
pub mod routes;
/// Secret providers and credential caching
pub mod secrets;
/// HTTP server bootstrap
pub mod server;
/// Request orchestration
pub mod service;
/// Plan persistence
pub mod store;
/// Request body validation
pub mod validation;

pub use mealplan_core;
