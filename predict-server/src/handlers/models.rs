//! Model status handler

use axum::{extract::State, Json};
use disease_predict_core::{DispatchStats, ModelMetadata};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct ModelStatus {
    pub models: Vec<ModelMetadata>,
    pub stats: DispatchStats,
}

pub async fn status(State(state): State<AppState>) -> Json<ModelStatus> {
    let dispatcher = state.pipeline.dispatcher();
    Json(ModelStatus {
        models: dispatcher.models().metadata().into_iter().cloned().collect(),
        stats: dispatcher.stats(),
    })
}
