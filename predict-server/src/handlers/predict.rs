//! Form submission handler

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use disease_predict_core::{Label, SubmitError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppError, AppResult, AppState};

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// Raw field values, in schema order
    pub inputs: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub request_id: Uuid,
    pub disease: String,
    pub label: Label,
    pub message: String,
    pub positive: bool,
}

/// Validate a form submission and classify it
pub async fn predict(
    State(state): State<AppState>,
    Path(disease): Path<String>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let request_id = Uuid::new_v4();
    let Json(req) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let schema = state
        .pipeline
        .forms()
        .schema(&disease)
        .map_err(|e| AppError::NotFound(e.to_string()))?;

    // Keeps the form aligned with its schema before validation
    if req.inputs.len() != schema.len() {
        return Err(AppError::BadRequest(format!(
            "'{}' expects {} inputs, got {}",
            disease,
            schema.len(),
            req.inputs.len()
        )));
    }

    // Classifiers run synchronously and may hold a session lock
    let pipeline = Arc::clone(&state.pipeline);
    let id = disease.clone();
    let outcome = tokio::task::spawn_blocking(move || pipeline.submit(&id, &req.inputs))
        .await
        .map_err(|e| AppError::InternalError(format!("prediction task failed: {}", e)))?;

    match outcome {
        Ok(verdict) => {
            tracing::info!(
                %request_id,
                disease = %verdict.disease,
                label = verdict.label.as_u8(),
                "Prediction served"
            );
            Ok(Json(PredictResponse {
                request_id,
                positive: verdict.is_positive(),
                disease: verdict.disease,
                label: verdict.label,
                message: verdict.message,
            }))
        }
        Err(SubmitError::Validation(errors)) => {
            tracing::debug!(%request_id, %disease, errors = errors.error_count(), "Submission rejected");
            Err(AppError::validation(schema, &errors))
        }
        Err(SubmitError::Dispatch(e)) if e.is_fatal() => {
            tracing::error!(%request_id, "Registry invariant broken, shutting down: {}", e);
            state.shutdown.notify_one();
            Err(AppError::InternalError(e.to_string()))
        }
        Err(SubmitError::Dispatch(e)) => {
            Err(AppError::PredictionFailed(format!("request {}: {}", request_id, e)))
        }
    }
}
