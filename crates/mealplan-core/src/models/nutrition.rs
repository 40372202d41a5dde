// ABOUTME: Meal plan models for request targets, generated plans, and persisted records
// ABOUTME: MealPlanRequest, Meal, MacroTotals, GeneratedPlan, PlanSource, MealPlanRecord
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Nutrition targets for a single plan request
///
/// Only ever constructed from a validated body; there is no partially
/// populated form of this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanRequest {
    /// Daily calorie target (kcal), always positive
    pub calories: u32,
    /// Daily protein target in grams, always positive
    pub protein_g: u32,
    /// Foods the plan should avoid
    #[serde(default)]
    pub dislikes: Vec<String>,
    /// Daily budget in USD, never negative
    pub budget_per_day_usd: f64,
}

/// Macro totals for a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTotals {
    /// Energy (kcal)
    pub kcal: u32,
    /// Protein (g)
    pub protein: u32,
    /// Carbohydrates (g)
    pub carbs: u32,
    /// Fat (g)
    pub fat: u32,
}

/// A single meal in a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    /// Display name
    pub name: String,
    /// Approximate calories (kcal)
    pub calories: u32,
    /// Approximate protein (g)
    pub protein_g: u32,
    /// Approximate carbohydrates (g)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs_g: Option<u32>,
    /// Approximate fat (g)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_g: Option<u32>,
    /// Ingredients with rough quantities
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<String>,
    /// Preparation instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep: Option<String>,
}

/// A meal plan, either produced by the remote model or synthesized locally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPlan {
    /// Meals in serving order
    pub meals: Vec<Meal>,
    /// Reported totals; remote plans may omit them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totals: Option<MacroTotals>,
    /// Aggregated shopping list
    #[serde(default)]
    pub shopping_list: Vec<String>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl GeneratedPlan {
    /// Whether the plan has no meals
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    /// Sum of meal calories, saturating at `u32::MAX`
    #[must_use]
    pub fn total_calories(&self) -> u32 {
        self.meals
            .iter()
            .fold(0, |acc: u32, m| acc.saturating_add(m.calories))
    }

    /// Sum of meal protein, saturating at `u32::MAX`
    #[must_use]
    pub fn total_protein_g(&self) -> u32 {
        self.meals
            .iter()
            .fold(0, |acc: u32, m| acc.saturating_add(m.protein_g))
    }
}

/// Where a plan came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    /// Produced by the remote language model
    Generated,
    /// Synthesized locally after a remote failure
    Fallback,
}

impl PlanSource {
    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for PlanSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write-once record persisted for every successful request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanRecord {
    /// Unique identifier, assigned at creation
    pub plan_id: Uuid,
    /// Validated request payload
    pub request: MealPlanRequest,
    /// Plan returned to the caller
    pub plan: GeneratedPlan,
    /// Source of the plan
    pub source: PlanSource,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl MealPlanRecord {
    /// Create a record with a fresh identifier and the current timestamp
    #[must_use]
    pub fn new(request: MealPlanRequest, plan: GeneratedPlan, source: PlanSource) -> Self {
        Self {
            plan_id: Uuid::new_v4(),
            request,
            plan,
            source,
            created_at: Utc::now(),
        }
    }
}
