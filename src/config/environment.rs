// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses server, plan store, secret provider, and model endpoint settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use anyhow::{bail, Context, Result};
use mealplan_core::constants::{llm, network, storage};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Which plan store backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Durable `SQLite` database
    #[default]
    Sqlite,
    /// Process-local map for development; never evicts and is lost on restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => bail!("Unknown PLAN_STORE '{other}' (expected sqlite or memory)"),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite => write!(f, "sqlite"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Which secret provider backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecretBackend {
    /// Parameter name is an environment variable
    #[default]
    Env,
    /// Parameter name is a file inside `SECRETS_DIR`
    File,
}

impl FromStr for SecretBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "env" => Ok(Self::Env),
            "file" => Ok(Self::File),
            other => bail!("Unknown SECRET_BACKEND '{other}' (expected env or file)"),
        }
    }
}

/// Plan store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Backend selection
    pub backend: StoreBackend,
    /// `SQLite` connection string
    pub database_url: String,
}

/// Secret provider configuration
#[derive(Debug, Clone)]
pub struct SecretsConfig {
    /// Backend selection
    pub backend: SecretBackend,
    /// Directory holding one file per parameter (file backend only)
    pub secrets_dir: Option<PathBuf>,
    /// Logical name of the model API credential
    pub credential_param: String,
}

/// Remote generation endpoint configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// OpenAI-compatible base URL
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

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: llm::DEFAULT_BASE_URL.to_owned(),
            model: llm::DEFAULT_MODEL.to_owned(),
            timeout: Duration::from_secs(llm::DEFAULT_TIMEOUT_SECS),
            max_tokens: llm::DEFAULT_MAX_TOKENS,
            temperature: llm::DEFAULT_TEMPERATURE,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Outer timeout for every HTTP request
    pub request_timeout: Duration,
    /// Maximum request body size
    pub max_body_bytes: usize,
    /// Plan store settings
    pub store: StoreConfig,
    /// Secret provider settings
    pub secrets: SecretsConfig,
    /// Model endpoint settings
    pub llm: LlmConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is set to an unparseable value
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns an error if any value is unparseable or the combination is invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        let request_timeout_secs: u64 = parse_var(&lookup, "REQUEST_TIMEOUT_SECS")?
            .unwrap_or(network::DEFAULT_REQUEST_TIMEOUT_SECS);
        let llm_timeout_secs: u64 =
            parse_var(&lookup, "LLM_TIMEOUT_SECS")?.unwrap_or(llm::DEFAULT_TIMEOUT_SECS);

        if llm_timeout_secs == 0 {
            bail!("LLM_TIMEOUT_SECS must be greater than zero");
        }
        if request_timeout_secs <= llm_timeout_secs {
            bail!(
                "REQUEST_TIMEOUT_SECS ({request_timeout_secs}) must exceed LLM_TIMEOUT_SECS ({llm_timeout_secs})"
            );
        }

        let secrets = SecretsConfig {
            backend: var_or("SECRET_BACKEND", "env").parse()?,
            secrets_dir: lookup("SECRETS_DIR").map(PathBuf::from),
            credential_param: var_or("OPENAI_PARAM", llm::DEFAULT_CREDENTIAL_PARAM),
        };
        if secrets.backend == SecretBackend::File && secrets.secrets_dir.is_none() {
            bail!("SECRET_BACKEND=file requires SECRETS_DIR");
        }

        let temperature: f32 =
            parse_var(&lookup, "LLM_TEMPERATURE")?.unwrap_or(llm::DEFAULT_TEMPERATURE);
        if !(0.0..=2.0).contains(&temperature) {
            bail!("LLM_TEMPERATURE must be between 0.0 and 2.0, got {temperature}");
        }

        Ok(Self {
            host: var_or("HOST", network::DEFAULT_HOST),
            http_port: parse_var(&lookup, "HTTP_PORT")?.unwrap_or(network::DEFAULT_HTTP_PORT),
            request_timeout: Duration::from_secs(request_timeout_secs),
            max_body_bytes: parse_var(&lookup, "MAX_BODY_BYTES")?
                .unwrap_or(network::DEFAULT_MAX_BODY_BYTES),
            store: StoreConfig {
                backend: var_or("PLAN_STORE", "sqlite").parse()?,
                database_url: var_or("DATABASE_URL", storage::DEFAULT_DATABASE_URL),
            },
            secrets,
            llm: LlmConfig {
                base_url: var_or("LLM_BASE_URL", llm::DEFAULT_BASE_URL),
                model: var_or("LLM_MODEL", llm::DEFAULT_MODEL),
                timeout: Duration::from_secs(llm_timeout_secs),
                max_tokens: parse_var(&lookup, "LLM_MAX_TOKENS")?
                    .unwrap_or(llm::DEFAULT_MAX_TOKENS),
                temperature,
            },
        })
    }

    /// One-line human-readable summary (never includes secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "http={}:{} store={} secrets={:?}:{} model={} via {} (timeout {}s)",
            self.host,
            self.http_port,
            self.store.backend,
            self.secrets.backend,
            self.secrets.credential_param,
            self.llm.model,
            self.llm.base_url,
            self.llm.timeout.as_secs()
        )
    }
}

/// Parse an optional variable, failing loudly on garbage
fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Invalid {key} value '{raw}'"))
        })
        .transpose()
}
