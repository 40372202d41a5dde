// ABOUTME: Secret provider abstraction for retrieving the model API credential
// ABOUTME: Pluggable backends (environment, secret files) plus a process-lifetime credential cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Secret Provider
//!
//! A secret provider maps a logical parameter name to a credential string.
//! [`CachedCredential`] wraps a provider and fetches the value at most once
//! per process on the success path; the cached value is immutable afterwards.

/// Environment variable backend
pub mod env;
/// Secret file directory backend
pub mod file;

pub use env::EnvSecretProvider;
pub use file::FileSecretProvider;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::config::{SecretBackend, SecretsConfig};

/// Failures when resolving a secret parameter
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretError {
    /// No parameter with this name exists
    #[error("secret parameter '{name}' not found")]
    NotFound {
        /// Parameter name
        name: String,
    },
    /// The parameter exists but cannot be read
    #[error("access denied to secret parameter '{name}': {reason}")]
    AccessDenied {
        /// Parameter name
        name: String,
        /// Backend-specific reason
        reason: String,
    },
}

/// Source of secret parameters
#[async_trait]
pub trait SecretProvider: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// Resolve a parameter to its value
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::NotFound`] or [`SecretError::AccessDenied`]
    async fn get_parameter(&self, name: &str) -> Result<String, SecretError>;
}

/// Build the configured secret provider
#[must_use]
pub fn provider_from_config(config: &SecretsConfig) -> Arc<dyn SecretProvider> {
    match (config.backend, &config.secrets_dir) {
        (SecretBackend::File, Some(dir)) => Arc::new(FileSecretProvider::new(dir.clone())),
        _ => Arc::new(EnvSecretProvider::new()),
    }
}

/// Lazily fetched credential, immutable after the first successful lookup
///
/// Failed lookups are not cached, so a credential fixed while the process is
/// running is picked up on the next request.
pub struct CachedCredential {
    provider: Arc<dyn SecretProvider>,
    param_name: String,
    value: OnceCell<String>,
}

impl CachedCredential {
    /// Create an empty cache for the given parameter
    #[must_use]
    pub fn new(provider: Arc<dyn SecretProvider>, param_name: impl Into<String>) -> Self {
        Self {
            provider,
            param_name: param_name.into(),
            value: OnceCell::new(),
        }
    }

    /// Parameter this cache resolves
    #[must_use]
    pub fn param_name(&self) -> &str {
        &self.param_name
    }

    /// Whether the value has been fetched
    #[must_use]
    pub fn is_populated(&self) -> bool {
        self.value.initialized()
    }

    /// Return the credential, fetching it on first use
    ///
    /// # Errors
    ///
    /// Propagates the provider's [`SecretError`]
    pub async fn get(&self) -> Result<&str, SecretError> {
        if let Some(value) = self.value.get() {
            return Ok(value.as_str());
        }

        let value = self
            .value
            .get_or_try_init(|| async {
                debug!(
                    provider = self.provider.name(),
                    param = %self.param_name,
                    "Fetching credential"
                );
                self.provider.get_parameter(&self.param_name).await
            })
            .await?;

        info!(
            provider = self.provider.name(),
            param = %self.param_name,
            "Credential cached for process lifetime"
        );
        Ok(value.as_str())
    }
}
