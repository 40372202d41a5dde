// ABOUTME: Secret file provider for mounted secret volumes
// ABOUTME: Resolves a parameter name to a file inside a configured directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use super::{SecretError, SecretProvider};

/// Reads parameters from `<dir>/<name>`, trimming trailing whitespace
#[derive(Debug, Clone)]
pub struct FileSecretProvider {
    dir: PathBuf,
}

impl FileSecretProvider {
    /// Create a provider rooted at `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Parameter names must stay inside the secrets directory
    fn resolve(&self, name: &str) -> Result<PathBuf, SecretError> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => Ok(self.dir.join(part)),
            _ => Err(SecretError::AccessDenied {
                name: name.to_owned(),
                reason: "parameter name must be a single path segment".to_owned(),
            }),
        }
    }
}

#[async_trait]
impl SecretProvider for FileSecretProvider {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn get_parameter(&self, name: &str) -> Result<String, SecretError> {
        let path = self.resolve(name)?;

        match tokio::fs::read_to_string(&path).await {
            Ok(contents) if !contents.trim().is_empty() => Ok(contents.trim().to_owned()),
            Ok(_) => Err(SecretError::NotFound {
                name: name.to_owned(),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(SecretError::NotFound {
                name: name.to_owned(),
            }),
            Err(e) => Err(SecretError::AccessDenied {
                name: name.to_owned(),
                reason: e.to_string(),
            }),
        }
    }
}
