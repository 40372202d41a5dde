// ABOUTME: Route module organization for the meal plan server HTTP endpoints
// ABOUTME: Assembles domain routers and the shared tower-http middleware stack
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP routes
//!
//! Each domain module holds route definitions and thin handlers that delegate
//! to the service layer. [`router`] merges them and applies request tracing,
//! request ids, an outer timeout and a body size limit.

/// Meal plan generation routes
pub mod generate;
/// Health check and readiness routes
pub mod health;

pub use generate::GenerateRoutes;
pub use health::HealthRoutes;

use axum::http::HeaderName;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::service::MealPlanService;

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the complete application router
#[must_use]
pub fn router(
    service: Arc<MealPlanService>,
    request_timeout: Duration,
    max_body_bytes: usize,
) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .merge(GenerateRoutes::routes(service))
        .merge(HealthRoutes::routes())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}
