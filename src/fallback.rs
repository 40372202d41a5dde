// ABOUTME: Fallback resolver that substitutes a deterministic plan for failed generations
// ABOUTME: Separates expected load shedding from misconfiguration in telemetry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Fallback Resolution
//!
//! [`resolve`] turns a [`GenerationOutcome`] into the plan that is returned to
//! the caller. A successful remote plan passes through untouched; any
//! classified failure is replaced by [`synthesize_fallback_plan`], whose meal
//! totals equal the requested calorie and protein targets exactly. A remote
//! plan with no meals counts as a malformed response.
//!
//! The resolver performs no I/O and cannot fail.

use mealplan_core::constants::fallback::{
    CARB_SHARE_PERCENT, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN_OR_CARB, MEAL_SHARES_PERCENT,
};
use mealplan_core::models::{GeneratedPlan, MacroTotals, Meal, MealPlanRequest, PlanSource};

use crate::llm::{GenerationFailure, GenerationOutcome};
use crate::logging::AppLogger;

/// Plan chosen for a request, with the failure it replaced if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Plan returned to the caller
    pub plan: GeneratedPlan,
    /// Where the plan came from
    pub source: PlanSource,
    /// Failure that triggered the fallback
    pub failure: Option<GenerationFailure>,
}

/// Pick the plan for `request` given the generation outcome
#[must_use]
pub fn resolve(request: &MealPlanRequest, outcome: GenerationOutcome) -> Resolution {
    let outcome = outcome.and_then(|plan| {
        if plan.is_empty() {
            Err(GenerationFailure::MalformedResponse {
                detail: "plan has no meals".to_owned(),
            })
        } else {
            Ok(plan)
        }
    });

    match outcome {
        Ok(plan) => {
            AppLogger::log_plan_generated(plan.meals.len(), plan.total_calories());
            Resolution {
                plan,
                source: PlanSource::Generated,
                failure: None,
            }
        }
        Err(failure) => {
            if failure.is_misconfiguration() {
                AppLogger::log_fallback_misconfiguration(failure.kind(), failure.detail());
            } else {
                AppLogger::log_fallback_load_shedding(failure.kind(), failure.detail());
            }
            Resolution {
                plan: synthesize_fallback_plan(request),
                source: PlanSource::Fallback,
                failure: Some(failure),
            }
        }
    }
}

struct MealTemplate {
    name: &'static str,
    ingredients: &'static [&'static str],
    prep: &'static str,
}

const TEMPLATES: [MealTemplate; 3] = [
    MealTemplate {
        name: "Greek yogurt bowl",
        ingredients: &[
            "Greek yogurt (250g)",
            "rolled oats (50g)",
            "berries (100g)",
            "honey (1 tsp)",
        ],
        prep: "Layer yogurt, oats and berries in a bowl. Drizzle with honey.",
    },
    MealTemplate {
        name: "Chicken rice bowl",
        ingredients: &[
            "chicken breast (180g)",
            "cooked rice (200g)",
            "mixed vegetables (150g)",
            "olive oil (1 tbsp)",
        ],
        prep: "Pan-sear the chicken in olive oil, steam the vegetables and serve over rice.",
    },
    MealTemplate {
        name: "Salmon with potatoes and greens",
        ingredients: &[
            "salmon fillet (170g)",
            "potatoes (250g)",
            "green beans (150g)",
            "lemon (1/2)",
        ],
        prep: "Roast potatoes at 200C for 30 minutes, adding salmon and beans for the last 12. Finish with lemon.",
    },
];

const SHOPPING_LIST: [&str; 12] = [
    "Greek yogurt",
    "rolled oats",
    "berries",
    "honey",
    "chicken breast",
    "rice",
    "mixed vegetables",
    "olive oil",
    "salmon fillet",
    "potatoes",
    "green beans",
    "lemon",
];

const FALLBACK_NOTES: &str = "Fallback plan: portions are scaled to your calorie and protein \
targets. Food preferences and budget were not applied.";

/// Build the deterministic fallback plan for `request`
///
/// Calories and protein are split across breakfast, lunch and dinner by fixed
/// shares; dinner takes the remainder so the meal sums equal the targets.
#[must_use]
pub fn synthesize_fallback_plan(request: &MealPlanRequest) -> GeneratedPlan {
    let kcal = split_by_shares(request.calories);
    let protein = split_by_shares(request.protein_g);

    let meals: Vec<Meal> = TEMPLATES
        .iter()
        .zip(kcal.iter().zip(protein.iter()))
        .map(|(template, (&meal_kcal, &meal_protein))| {
            let (carbs, fat) = carbs_and_fat(meal_kcal, meal_protein);
            Meal {
                name: template.name.to_owned(),
                calories: meal_kcal,
                protein_g: meal_protein,
                carbs_g: Some(carbs),
                fat_g: Some(fat),
                ingredients: template.ingredients.iter().map(|&s| s.to_owned()).collect(),
                prep: Some(template.prep.to_owned()),
            }
        })
        .collect();

    let totals = MacroTotals {
        kcal: request.calories,
        protein: request.protein_g,
        carbs: meals.iter().filter_map(|m| m.carbs_g).sum(),
        fat: meals.iter().filter_map(|m| m.fat_g).sum(),
    };

    GeneratedPlan {
        meals,
        totals: Some(totals),
        shopping_list: SHOPPING_LIST.iter().map(|&s| s.to_owned()).collect(),
        notes: Some(FALLBACK_NOTES.to_owned()),
    }
}

/// Split `total` into breakfast, lunch and dinner portions summing to `total`
fn split_by_shares(total: u32) -> [u32; 3] {
    let share = |percent: u32| {
        // u64 keeps total * percent from overflowing; the result is <= total
        u32::try_from(u64::from(total) * u64::from(percent) / 100).unwrap_or(total)
    };
    let breakfast = share(MEAL_SHARES_PERCENT[0]);
    let lunch = share(MEAL_SHARES_PERCENT[1]);
    [breakfast, lunch, total - breakfast - lunch]
}

/// Carb and fat grams filling the calories protein does not cover
fn carbs_and_fat(kcal: u32, protein_g: u32) -> (u32, u32) {
    let protein_kcal = u64::from(protein_g) * u64::from(KCAL_PER_GRAM_PROTEIN_OR_CARB);
    let rest = u64::from(kcal).saturating_sub(protein_kcal);

    let carb_kcal = rest * u64::from(CARB_SHARE_PERCENT) / 100;
    let fat_kcal = rest - carb_kcal;

    let carbs = carb_kcal / u64::from(KCAL_PER_GRAM_PROTEIN_OR_CARB);
    let fat = fat_kcal / u64::from(KCAL_PER_GRAM_FAT);
    (
        u32::try_from(carbs).unwrap_or(u32::MAX),
        u32::try_from(fat).unwrap_or(u32::MAX),
    )
}
