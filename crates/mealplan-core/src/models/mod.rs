// ABOUTME: Core data models for the meal plan generation service
// ABOUTME: Re-exports request, plan, and persisted record types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `MealPlanRequest`: validated nutrition targets for one request
//! - `GeneratedPlan`: the meals returned to the caller
//! - `MealPlanRecord`: the write-once row persisted per request

mod nutrition;

pub use nutrition::{
    GeneratedPlan, MacroTotals, Meal, MealPlanRecord, MealPlanRequest, PlanSource,
};
