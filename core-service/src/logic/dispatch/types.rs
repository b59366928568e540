//! Dispatch Types

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::model::ClassifierError;
use crate::logic::schema::{Label, UnknownDisease};

/// A label paired with its message for one disease
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub disease: String,
    pub label: Label,
    pub message: String,
}

impl Verdict {
    pub fn is_positive(&self) -> bool {
        self.label.is_positive()
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    UnknownDisease(#[from] UnknownDisease),
    /// Registry missing a classifier for a registered form. Means the
    /// startup invariant is broken; the process should stop serving.
    #[error("no classifier loaded for '{0}'")]
    ModelNotLoaded(String),
    #[error("'{disease}' expects {expected} features, got {actual}")]
    FeatureLengthMismatch { disease: String, expected: usize, actual: usize },
    #[error("classifier for '{disease}' failed: {source}")]
    Classifier {
        disease: String,
        #[source]
        source: ClassifierError,
    },
}

impl DispatchError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, DispatchError::ModelNotLoaded(_))
    }
}

/// Inference counters, for status output only
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DispatchStats {
    pub inference_count: u64,
    pub failure_count: u64,
    pub avg_latency_ms: f32,
}
