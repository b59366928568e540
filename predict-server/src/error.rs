//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use disease_predict_core::{FormSchema, ValidationError};
use serde::Serialize;
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, Serialize)]
pub struct MissingField {
    pub index: usize,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvalidField {
    pub index: usize,
    pub name: String,
    pub value: String,
}

#[derive(Debug)]
pub enum AppError {
    // Resource errors
    NotFound(String),

    // Client errors
    BadRequest(String),

    // Form input errors, every bad field at once
    Validation {
        message: String,
        missing: Vec<MissingField>,
        invalid: Vec<InvalidField>,
    },

    // Model errors (details logged, generic body)
    PredictionFailed(String),

    // Generic errors
    InternalError(String),
}

impl AppError {
    /// Name every bad field of a rejected submission
    pub fn validation(schema: &FormSchema, errors: &ValidationError) -> Self {
        let name = |i: usize| schema.field(i).map(|f| f.name.clone()).unwrap_or_default();

        AppError::Validation {
            message: errors.describe(schema),
            missing: errors
                .missing
                .iter()
                .map(|&index| MissingField { index, name: name(index) })
                .collect(),
            invalid: errors
                .invalid
                .iter()
                .map(|(&index, value)| InvalidField { index, name: name(index), value: value.clone() })
                .collect(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                json!({ "error": msg, "status": StatusCode::NOT_FOUND.as_u16() }),
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": msg, "status": StatusCode::BAD_REQUEST.as_u16() }),
            ),
            AppError::Validation { message, missing, invalid } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": "validation",
                    "status": StatusCode::UNPROCESSABLE_ENTITY.as_u16(),
                    "message": message,
                    "missing": missing,
                    "invalid": invalid,
                }),
            ),
            AppError::PredictionFailed(msg) => {
                tracing::error!("Prediction failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Prediction service failure",
                        "status": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                    }),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Internal server error",
                        "status": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
