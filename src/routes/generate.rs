// ABOUTME: Meal plan generation route handler
// ABOUTME: Accepts the raw POST body and delegates to MealPlanService
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::{
    body::Bytes, extract::State, http::StatusCode, response::IntoResponse, routing::post, Json,
    Router,
};
use mealplan_core::constants::routes;
use mealplan_core::errors::AppError;
use std::sync::Arc;

use crate::service::MealPlanService;

/// Meal plan generation routes
pub struct GenerateRoutes;

impl GenerateRoutes {
    /// Create the `/generate` route
    pub fn routes(service: Arc<MealPlanService>) -> Router {
        Router::new()
            .route(routes::GENERATE, post(Self::handle_generate))
            .with_state(service)
    }

    /// Raw body in, JSON parsing happens in validation
    async fn handle_generate(
        State(service): State<Arc<MealPlanService>>,
        body: Bytes,
    ) -> Result<impl IntoResponse, AppError> {
        let response = service.handle(&body).await?;
        Ok((StatusCode::OK, Json(response)))
    }
}
