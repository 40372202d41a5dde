// ABOUTME: Environment variable secret provider
// ABOUTME: Treats the parameter name as the name of an environment variable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use std::env;

use super::{SecretError, SecretProvider};

/// Reads parameters from the process environment
#[derive(Debug, Clone, Default)]
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    /// Create the provider
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SecretProvider for EnvSecretProvider {
    fn name(&self) -> &'static str {
        "env"
    }

    async fn get_parameter(&self, name: &str) -> Result<String, SecretError> {
        match env::var(name) {
            Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_owned()),
            Ok(_) | Err(env::VarError::NotPresent) => Err(SecretError::NotFound {
                name: name.to_owned(),
            }),
            Err(env::VarError::NotUnicode(_)) => Err(SecretError::AccessDenied {
                name: name.to_owned(),
                reason: "value is not valid UTF-8".to_owned(),
            }),
        }
    }
}
