// ABOUTME: Meal plan request orchestration from raw body to response payload
// ABOUTME: Validates, generates once, resolves fallback, persists best-effort, and shapes the response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use mealplan_core::errors::{AppError, AppResult};
use mealplan_core::models::{GeneratedPlan, MacroTotals, Meal, MealPlanRecord, PlanSource};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::fallback::{self, Resolution};
use crate::llm::{build_plan_prompt, PlanGenerator};
use crate::logging::AppLogger;
use crate::store::PlanStore;
use crate::validation;

/// Body of a successful `/generate` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Identifier of the persisted record
    pub plan_id: Uuid,
    /// Meals in serving order
    pub plan: Vec<Meal>,
    /// Whether the plan came from the model or the fallback
    pub source: PlanSource,
    /// Macro totals, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totals: Option<MacroTotals>,
    /// Aggregated shopping list
    #[serde(default)]
    pub shopping_list: Vec<String>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl GenerateResponse {
    fn from_record(plan_id: Uuid, source: PlanSource, plan: GeneratedPlan) -> Self {
        Self {
            plan_id,
            plan: plan.meals,
            source,
            totals: plan.totals,
            shopping_list: plan.shopping_list,
            notes: plan.notes,
        }
    }
}

/// Handles one meal plan request end to end
#[derive(Clone)]
pub struct MealPlanService {
    generator: Arc<dyn PlanGenerator>,
    store: Arc<dyn PlanStore>,
}

impl MealPlanService {
    /// Create a service over a generator and a store
    #[must_use]
    pub fn new(generator: Arc<dyn PlanGenerator>, store: Arc<dyn PlanStore>) -> Self {
        Self { generator, store }
    }

    /// Handle a raw `/generate` body
    ///
    /// Invalid bodies are rejected before any generation call or store write.
    /// A failed store write is logged and does not change the result.
    ///
    /// # Errors
    ///
    /// Returns a 400 [`AppError`] for invalid input, or a 502 [`AppError`]
    /// when even the fallback plan has no meals
    #[instrument(skip_all, fields(generator = self.generator.name(), store = self.store.backend_name()))]
    pub async fn handle(&self, body: &[u8]) -> AppResult<GenerateResponse> {
        let request = validation::parse_request(body)?;

        let prompt = build_plan_prompt(&request);
        let outcome = self.generator.generate(&prompt).await;
        let Resolution { plan, source, .. } = fallback::resolve(&request, outcome);

        if plan.is_empty() {
            AppLogger::log_plan_unavailable(source.as_str());
            return Err(AppError::plan_unavailable(format!(
                "{source} plan contains no meals"
            )));
        }

        let record = MealPlanRecord::new(request, plan, source);
        let plan_id = record.plan_id;

        if let Err(e) = self.store.put(&record).await {
            AppLogger::log_store_write_failed(&plan_id.to_string(), &e.to_string());
        }

        info!(%plan_id, %source, meals = record.plan.meals.len(), "Meal plan served");
        Ok(GenerateResponse::from_record(plan_id, source, record.plan))
    }
}
