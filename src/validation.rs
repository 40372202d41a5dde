// ABOUTME: Strict request body validation for meal plan generation
// ABOUTME: Parses raw bytes into MealPlanRequest with field-level error reporting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Request validation
//!
//! Bodies are parsed into a [`serde_json::Value`] first and each field is
//! checked and reported by name. Whole-number floats such as `2000.0` are
//! accepted for integer fields.

use mealplan_core::errors::{AppError, ErrorCode};
use mealplan_core::models::MealPlanRequest;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Why a request body was rejected
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Body is not valid JSON
    #[error("request body is not valid JSON: {0}")]
    MalformedBody(String),
    /// Body is JSON but not an object
    #[error("request body must be a JSON object")]
    NotAnObject,
    /// Required field is absent or null
    #[error("missing required field '{0}'")]
    Missing(&'static str),
    /// Field is not a number
    #[error("field '{0}' must be a number")]
    NotANumber(&'static str),
    /// Field is below zero
    #[error("field '{0}' must not be negative")]
    Negative(&'static str),
    /// Field must be a whole number
    #[error("field '{0}' must be an integer")]
    NotInteger(&'static str),
    /// Field must be greater than zero
    #[error("field '{0}' must be greater than zero")]
    NotPositive(&'static str),
    /// Field exceeds the supported range
    #[error("field '{0}' is too large")]
    TooLarge(&'static str),
    /// `dislikes` is present but not a list of strings
    #[error("field 'dislikes' must be a list of strings")]
    InvalidDislikes,
}

impl ValidationError {
    /// Offending field, when one can be named
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::Missing(f)
            | Self::NotANumber(f)
            | Self::Negative(f)
            | Self::NotInteger(f)
            | Self::NotPositive(f)
            | Self::TooLarge(f) => Some(f),
            Self::InvalidDislikes => Some("dislikes"),
            Self::MalformedBody(_) | Self::NotAnObject => None,
        }
    }

    const fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedBody(_) | Self::NotAnObject => ErrorCode::InvalidFormat,
            Self::Missing(_) => ErrorCode::MissingRequiredField,
            Self::NotANumber(_) | Self::NotInteger(_) | Self::InvalidDislikes => {
                ErrorCode::InvalidInput
            }
            Self::Negative(_) | Self::NotPositive(_) | Self::TooLarge(_) => {
                ErrorCode::ValueOutOfRange
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        let code = error.code();
        let app_error = Self::new(code, error.to_string());
        match error.field() {
            Some(field) => app_error.with_details(serde_json::json!({ "field": field })),
            None => app_error,
        }
    }
}

/// Parse and validate a raw `/generate` body
///
/// # Errors
///
/// Returns the first [`ValidationError`] found, checking fields in the order
/// `calories`, `protein_g`, `budget_per_day_usd`, `dislikes`
pub fn parse_request(body: &[u8]) -> Result<MealPlanRequest, ValidationError> {
    let result = parse_value(body);
    if let Err(ref e) = result {
        debug!(error = %e, field = e.field(), "Rejected meal plan request");
    }
    result
}

fn parse_value(body: &[u8]) -> Result<MealPlanRequest, ValidationError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ValidationError::MalformedBody(e.to_string()))?;
    let object = value.as_object().ok_or(ValidationError::NotAnObject)?;

    Ok(MealPlanRequest {
        calories: positive_integer(object, "calories")?,
        protein_g: positive_integer(object, "protein_g")?,
        budget_per_day_usd: non_negative_number(object, "budget_per_day_usd")?,
        dislikes: dislikes(object)?,
    })
}

fn number(object: &Map<String, Value>, field: &'static str) -> Result<f64, ValidationError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ValidationError::Missing(field)),
        Some(Value::Number(n)) => n.as_f64().ok_or(ValidationError::NotANumber(field)),
        Some(_) => Err(ValidationError::NotANumber(field)),
    }
}

fn non_negative_number(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<f64, ValidationError> {
    let value = number(object, field)?;
    if value < 0.0 {
        return Err(ValidationError::Negative(field));
    }
    Ok(value)
}

fn positive_integer(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<u32, ValidationError> {
    let value = non_negative_number(object, field)?;
    if value.fract() != 0.0 {
        return Err(ValidationError::NotInteger(field));
    }
    if value == 0.0 {
        return Err(ValidationError::NotPositive(field));
    }
    if value > f64::from(u32::MAX) {
        return Err(ValidationError::TooLarge(field));
    }
    // Range and integrality were checked above
    Ok(value as u32)
}

fn dislikes(object: &Map<String, Value>) -> Result<Vec<String>, ValidationError> {
    match object.get("dislikes") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_owned)
                    .ok_or(ValidationError::InvalidDislikes)
            })
            .collect(),
        Some(_) => Err(ValidationError::InvalidDislikes),
    }
}
