//! Form schema handlers

use axum::{extract::{Path, State}, Json};
use disease_predict_core::{FieldSpec, FormSchema, VerdictMap};
use serde::Serialize;

use crate::{AppError, AppResult, AppState};

/// Menu entry for one form
#[derive(Debug, Serialize)]
pub struct FormSummary {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub field_count: usize,
    pub fingerprint: u32,
}

impl From<&FormSchema> for FormSummary {
    fn from(schema: &FormSchema) -> Self {
        Self {
            id: schema.id().to_string(),
            title: schema.title().to_string(),
            subtitle: schema.subtitle().map(str::to_string),
            field_count: schema.len(),
            fingerprint: schema.fingerprint(),
        }
    }
}

/// Everything a client needs to render one form
#[derive(Debug, Serialize)]
pub struct FormDetail {
    #[serde(flatten)]
    pub summary: FormSummary,
    pub fields: Vec<FieldSpec>,
    pub verdicts: VerdictMap,
}

/// List forms in menu order
pub async fn list(State(state): State<AppState>) -> Json<Vec<FormSummary>> {
    let forms: Vec<FormSummary> =
        state.pipeline.forms().iter().map(|(schema, _)| schema.into()).collect();
    Json(forms)
}

/// Get one form's fields and verdict messages
pub async fn get(
    State(state): State<AppState>,
    Path(disease): Path<String>,
) -> AppResult<Json<FormDetail>> {
    let (schema, verdicts) = state
        .pipeline
        .forms()
        .get(&disease)
        .map_err(|e| AppError::NotFound(e.to_string()))?;

    Ok(Json(FormDetail {
        summary: schema.into(),
        fields: schema.fields().to_vec(),
        verdicts: verdicts.clone(),
    }))
}
