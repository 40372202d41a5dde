// ABOUTME: Stub generator, store, and secret provider implementations for integration tests
// ABOUTME: Records calls so tests can assert on generation attempts, store writes, and lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use async_trait::async_trait;
use mealplan_server::llm::{GenerationFailure, GenerationOutcome, PlanGenerator};
use mealplan_server::mealplan_core::models::{GeneratedPlan, MacroTotals, Meal, MealPlanRecord};
use mealplan_server::secrets::{SecretError, SecretProvider};
use mealplan_server::service::MealPlanService;
use mealplan_server::store::{InMemoryPlanStore, PlanStore, StoreError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Body used by the documented 2000 kcal scenario
pub fn scenario_body() -> serde_json::Value {
    serde_json::json!({
        "calories": 2000,
        "protein_g": 200,
        "dislikes": ["pickles"],
        "budget_per_day_usd": 7
    })
}

/// A plan as the remote model would return it
pub fn remote_plan() -> GeneratedPlan {
    GeneratedPlan {
        meals: vec![
            Meal {
                name: "Egg white omelette".into(),
                calories: 900,
                protein_g: 90,
                carbs_g: Some(60),
                fat_g: Some(30),
                ingredients: vec!["egg whites (300g)".into(), "spinach (50g)".into()],
                prep: Some("Whisk and cook in a non-stick pan.".into()),
            },
            Meal {
                name: "Turkey chili".into(),
                calories: 1100,
                protein_g: 110,
                carbs_g: Some(100),
                fat_g: Some(30),
                ingredients: vec!["ground turkey (250g)".into(), "kidney beans (200g)".into()],
                prep: None,
            },
        ],
        totals: Some(MacroTotals {
            kcal: 2000,
            protein: 200,
            carbs: 160,
            fat: 60,
        }),
        shopping_list: vec!["eggs".into(), "turkey".into(), "beans".into()],
        notes: Some("Remote notes".into()),
    }
}

/// Generator returning a fixed outcome and counting calls
pub struct StubGenerator {
    outcome: GenerationOutcome,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn new(outcome: GenerationOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn succeeding() -> Arc<Self> {
        Self::new(Ok(remote_plan()))
    }

    pub fn failing(failure: GenerationFailure) -> Arc<Self> {
        Self::new(Err(failure))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlanGenerator for StubGenerator {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn generate(&self, prompt: &str) -> GenerationOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_owned());
        self.outcome.clone()
    }
}

/// Store whose writes always fail
#[derive(Default)]
pub struct FailingStore {
    attempts: AtomicUsize,
}

impl FailingStore {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlanStore for FailingStore {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    async fn put(&self, _record: &MealPlanRecord) -> Result<(), StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Backend("disk full".into()))
    }
}

/// Secret provider holding at most one value, counting lookups
pub struct StaticSecrets {
    value: Mutex<Option<String>>,
    lookups: AtomicUsize,
}

impl StaticSecrets {
    pub fn with(value: &str) -> Arc<Self> {
        Arc::new(Self {
            value: Mutex::new(Some(value.to_owned())),
            lookups: AtomicUsize::new(0),
        })
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            value: Mutex::new(None),
            lookups: AtomicUsize::new(0),
        })
    }

    pub fn set(&self, value: &str) {
        *self.value.lock().unwrap() = Some(value.to_owned());
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretProvider for StaticSecrets {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn get_parameter(&self, name: &str) -> Result<String, SecretError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.value
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| SecretError::NotFound {
                name: name.to_owned(),
            })
    }
}

/// Service over a stub generator and a fresh in-memory store
pub fn service_with(generator: Arc<StubGenerator>) -> (Arc<MealPlanService>, InMemoryPlanStore) {
    let store = InMemoryPlanStore::new();
    let service = Arc::new(MealPlanService::new(generator, Arc::new(store.clone())));
    (service, store)
}
