// ABOUTME: Prompts for meal plan generation loaded at compile time
// ABOUTME: Provides the nutrition planner system prompt and the per-request user prompt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! The system prompt is loaded at compile time from a markdown file for easy
//! maintenance. The user prompt embeds every field of the request and spells
//! out the JSON shape the response parser expects.

use mealplan_core::models::MealPlanRequest;

/// Nutrition planner system prompt
pub const NUTRITION_SYSTEM_PROMPT: &str = include_str!("nutrition_system.md");

/// Response shape requested from the model
const RESPONSE_SHAPE: &str = "Return JSON with keys: \
meals (array of {name, ingredients, macros:{kcal,protein,carbs,fat}, prep}), \
totals ({kcal,protein,carbs,fat}), \
shopping_list (array of strings), \
notes (string).";

/// Get the system prompt for the nutrition planner
#[must_use]
pub const fn get_nutrition_system_prompt() -> &'static str {
    NUTRITION_SYSTEM_PROMPT
}

/// Build the user prompt for a validated request
#[must_use]
pub fn build_plan_prompt(request: &MealPlanRequest) -> String {
    let dislikes = if request.dislikes.is_empty() {
        "none".to_owned()
    } else {
        request.dislikes.join(", ")
    };

    format!(
        "Build a 1-day meal plan at about {} kcal and {} g protein. \
         Avoid these foods: {}. \
         Budget: ${} per day. \
         {RESPONSE_SHAPE}",
        request.calories,
        request.protein_g,
        dislikes,
        format_budget(request.budget_per_day_usd),
    )
}

/// Whole dollars print without cents
fn format_budget(budget: f64) -> String {
    if budget.fract() == 0.0 {
        format!("{budget:.0}")
    } else {
        format!("{budget:.2}")
    }
}
