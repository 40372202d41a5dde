// ABOUTME: Plan store abstraction for write-once persistence of generated meal plans
// ABOUTME: Pluggable backends (SQLite, in-memory) behind a single put operation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Store
//!
//! Every handled request produces exactly one [`MealPlanRecord`]. Stores only
//! insert: a second record with an existing identifier is rejected, never
//! merged. No read operation is part of the request path.

/// In-memory store for development and tests
pub mod memory;
/// `SQLite` store
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::InMemoryPlanStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqlitePlanStore;

use async_trait::async_trait;
use mealplan_core::models::MealPlanRecord;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::config::{StoreBackend, StoreConfig};
use crate::logging::AppLogger;

/// Failures writing a plan record
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with this identifier already exists
    #[error("plan {0} already exists")]
    DuplicateId(Uuid),
    /// The record could not be encoded
    #[error("failed to encode plan record: {0}")]
    Encoding(#[from] serde_json::Error),
    /// The backend rejected or failed the write
    #[error("plan store backend error: {0}")]
    Backend(String),
}

#[cfg(feature = "sqlite")]
impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        Self::Backend(error.to_string())
    }
}

/// Write-once persistence for meal plan records
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Backend name for logging
    fn backend_name(&self) -> &'static str;

    /// Insert a new record
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if the identifier is taken, or a
    /// backend error if the write fails
    async fn put(&self, record: &MealPlanRecord) -> Result<(), StoreError>;
}

/// Build the configured plan store, creating its schema if needed
///
/// # Errors
///
/// Returns an error if the database cannot be opened or migrated
pub async fn store_from_config(config: &StoreConfig) -> Result<Arc<dyn PlanStore>, StoreError> {
    let store: Arc<dyn PlanStore> = match config.backend {
        #[cfg(feature = "sqlite")]
        StoreBackend::Sqlite => Arc::new(SqlitePlanStore::connect(&config.database_url).await?),
        #[cfg(not(feature = "sqlite"))]
        StoreBackend::Sqlite => {
            return Err(StoreError::Backend(
                "built without the sqlite feature".to_owned(),
            ))
        }
        StoreBackend::Memory => {
            AppLogger::log_ephemeral_store();
            Arc::new(InMemoryPlanStore::new())
        }
    };
    info!(backend = store.backend_name(), "Plan store initialized");
    Ok(store)
}
