// ABOUTME: In-memory plan store backed by a concurrent map
// ABOUTME: Used for development and for asserting writes in tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use mealplan_core::models::MealPlanRecord;
use std::sync::Arc;
use uuid::Uuid;

use super::{PlanStore, StoreError};

/// Process-local plan store; contents are lost on restart
#[derive(Clone, Default)]
pub struct InMemoryPlanStore {
    records: Arc<DashMap<Uuid, MealPlanRecord>>,
}

impl InMemoryPlanStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Copy of a stored record
    #[must_use]
    pub fn get(&self, plan_id: &Uuid) -> Option<MealPlanRecord> {
        self.records.get(plan_id).map(|r| r.value().clone())
    }

    /// Copies of all stored records
    #[must_use]
    pub fn records(&self) -> Vec<MealPlanRecord> {
        self.records.iter().map(|r| r.value().clone()).collect()
    }
}

#[async_trait]
impl PlanStore for InMemoryPlanStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn put(&self, record: &MealPlanRecord) -> Result<(), StoreError> {
        match self.records.entry(record.plan_id) {
            Entry::Occupied(_) => Err(StoreError::DuplicateId(record.plan_id)),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            }
        }
    }
}
