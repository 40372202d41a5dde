// ABOUTME: SQLite plan store using sqlx
// ABOUTME: One row per request in the meal_plans table, insert-only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use mealplan_core::models::MealPlanRecord;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::debug;

use super::{PlanStore, StoreError};

/// `SQLite`-backed plan store
#[derive(Clone)]
pub struct SqlitePlanStore {
    pool: SqlitePool,
}

impl SqlitePlanStore {
    /// Open (creating if missing) the database and ensure the schema exists
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string is invalid or the database
    /// cannot be opened or migrated
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let in_memory = database_url.contains(":memory:");
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Each connection to :memory: is a separate database
        let max_connections = if in_memory { 1 } else { 5 };

        if !in_memory {
            if let Some(parent) = options.get_filename().parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|e| StoreError::Backend(e.to_string()))?;
                }
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Underlying connection pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the `meal_plans` table
    async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS meal_plans (
                plan_id TEXT PRIMARY KEY,
                request TEXT NOT NULL,
                plan TEXT NOT NULL,
                source TEXT NOT NULL CHECK (source IN ('generated', 'fallback')),
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_meal_plans_created_at ON meal_plans(created_at)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl PlanStore for SqlitePlanStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn put(&self, record: &MealPlanRecord) -> Result<(), StoreError> {
        let request = serde_json::to_string(&record.request)?;
        let plan = serde_json::to_string(&record.plan)?;

        let result = sqlx::query(
            r"
            INSERT INTO meal_plans (plan_id, request, plan, source, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(record.plan_id.to_string())
        .bind(request)
        .bind(plan)
        .bind(record.source.as_str())
        .bind(record.created_at.to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                debug!(plan_id = %record.plan_id, source = %record.source, "Plan record inserted");
                Ok(())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::DuplicateId(record.plan_id))
            }
            Err(e) => Err(e.into()),
        }
    }
}
