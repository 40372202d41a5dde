// ABOUTME: HTTP server bootstrap wiring configuration into the meal plan service
// ABOUTME: Builds the secret provider, generator, and plan store, then serves the router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::llm::{OpenAiCompatibleConfig, OpenAiCompatibleGenerator, PlanGenerator};
use crate::routes;
use crate::secrets::provider_from_config;
use crate::service::MealPlanService;
use crate::store::store_from_config;

/// Meal plan HTTP server
pub struct MealPlanServer {
    config: ServerConfig,
    service: Arc<MealPlanService>,
}

impl MealPlanServer {
    /// Create a server around an already-built service
    #[must_use]
    pub const fn new(config: ServerConfig, service: Arc<MealPlanService>) -> Self {
        Self { config, service }
    }

    /// Build every component from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or the plan store cannot be created
    pub async fn from_config(config: ServerConfig) -> Result<Self> {
        let secrets = provider_from_config(&config.secrets);
        info!(provider = secrets.name(), "Secret provider initialized");

        let generator: Arc<dyn PlanGenerator> = Arc::new(
            OpenAiCompatibleGenerator::new(
                OpenAiCompatibleConfig::from(&config.llm),
                secrets,
                config.secrets.credential_param.clone(),
            )
            .context("Failed to create model client")?,
        );

        let store = store_from_config(&config.store)
            .await
            .context("Failed to initialize plan store")?;

        let service = Arc::new(MealPlanService::new(generator, store));
        Ok(Self::new(config, service))
    }

    /// Router with all routes and middleware applied
    #[must_use]
    pub fn app(&self) -> Router {
        routes::router(
            Arc::clone(&self.service),
            self.config.request_timeout,
            self.config.max_body_bytes,
        )
    }

    /// Bind and serve until ctrl-c
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or the server fails
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.http_port);
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        info!(%addr, "Meal plan server listening");

        axum::serve(listener, self.app())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")?;

        info!("Meal plan server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
