// ABOUTME: Logging configuration and structured telemetry events for the meal plan service
// ABOUTME: Configures log levels, formatters, and the operational events operators alert on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Production-ready logging configuration with structured output

use anyhow::Result;
use mealplan_core::constants::{service_names, telemetry};
use serde_json::json;
use std::env;
use std::io;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include span open/close events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value, defaulting to pretty output
    #[must_use]
    pub fn from_str_or_default(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_spans: false,
            service_name: service_names::MEALPLAN_SERVER.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
        let format = LogFormat::from_str_or_default(
            &env::var("LOG_FORMAT").unwrap_or_default(),
        );
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        // In production, use more detailed logging
        let is_production = environment == "production";

        Self {
            level,
            // Production logs are machine-read
            format: if is_production && env::var("LOG_FORMAT").is_err() {
                LogFormat::Json
            } else {
                format
            },
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| service_names::MEALPLAN_SERVER.into()),
            service_version: env::var("SERVICE_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_owned()),
            environment,
        }
    }

    /// Build the filter with noise reduction for dependency crates
    fn env_filter(&self) -> EnvFilter {
        let base = env::var("RUST_LOG").unwrap_or_else(|_| self.level.clone());

        [
            "hyper=warn",
            "hyper::proto=warn",
            "reqwest=warn",
            "sqlx=warn",
            "tower_http=info",
        ]
        .iter()
        .fold(EnvFilter::new(base), |filter, directive| {
            filter.add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::WARN.into()),
            )
        })
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(true)
                    .with_writer(io::stdout)
                    .with_span_events(span_events)
                    .json();

                registry.with(json_layer).try_init()?;
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(true)
                    .with_writer(io::stdout)
                    .with_span_events(span_events);

                registry.with(pretty_layer).try_init()?;
            }
            LogFormat::Compact => {
                let compact_layer = fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(io::stdout)
                    .with_span_events(FmtSpan::NONE);

                registry.with(compact_layer).try_init()?;
            }
        }

        self.log_startup_info();

        Ok(())
    }

    /// Log structured startup information
    fn log_startup_info(&self) {
        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "Meal plan server starting up"
        );

        let config_summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "location": self.include_location,
                "spans": self.include_spans
            }
        });

        debug!("Logging configuration loaded: {}", config_summary);
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Operational telemetry events
///
/// Every event carries an `event` field from
/// [`mealplan_core::constants::telemetry`] and is emitted under the telemetry
/// target, so dashboards can key on it regardless of log format.
pub struct AppLogger;

impl AppLogger {
    /// Upstream refused or timed out and a fallback plan was served
    pub fn log_fallback_load_shedding(failure_kind: &str, detail: &str) {
        warn!(
            target: telemetry::TARGET,
            event = telemetry::FALLBACK_LOAD_SHEDDING,
            llm.failure = %failure_kind,
            llm.detail = %detail,
            "Model unavailable, serving fallback plan"
        );
    }

    /// Credential or contract defect; a fallback plan was served but the
    /// deployment needs attention
    pub fn log_fallback_misconfiguration(failure_kind: &str, detail: &str) {
        error!(
            target: telemetry::TARGET,
            event = telemetry::FALLBACK_MISCONFIGURATION,
            llm.failure = %failure_kind,
            llm.detail = %detail,
            "Model call misconfigured, serving fallback plan"
        );
    }

    /// Remote plan served
    pub fn log_plan_generated(meal_count: usize, total_calories: u32) {
        info!(
            target: telemetry::TARGET,
            event = telemetry::PLAN_GENERATED,
            plan.meals = meal_count,
            plan.kcal = total_calories,
            "Model plan generated"
        );
    }

    /// In-memory store selected; it only grows and is lost on restart
    pub fn log_ephemeral_store() {
        warn!(
            target: telemetry::TARGET,
            event = telemetry::STORE_EPHEMERAL,
            "In-memory plan store is for development only; records are never evicted"
        );
    }

    /// Best-effort store write failed; the response is still returned
    pub fn log_store_write_failed(plan_id: &str, detail: &str) {
        error!(
            target: telemetry::TARGET,
            event = telemetry::STORE_WRITE_FAILED,
            plan.id = %plan_id,
            store.detail = %detail,
            "Plan store write failed; response returned without persistence"
        );
    }

    /// Resolved plan was unusable
    pub fn log_plan_unavailable(source: &str) {
        error!(
            target: telemetry::TARGET,
            event = telemetry::PLAN_UNAVAILABLE,
            plan.source = %source,
            "Resolved plan is empty"
        );
    }
}
