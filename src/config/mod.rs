// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports the environment-driven server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! All configuration is read from environment variables at startup; there is
//! no configuration file.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    LlmConfig, SecretBackend, SecretsConfig, ServerConfig, StoreBackend, StoreConfig,
};
