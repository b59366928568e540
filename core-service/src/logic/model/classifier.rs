//! Classifier - opaque prediction handle
//!
//! A handle wraps whatever the model artifact deserialized into and exposes
//! a single `predict`. Any input scaling the model was trained with belongs
//! inside the handle.

use std::sync::Arc;

use thiserror::Error;

use crate::logic::features::FeatureVector;
use crate::logic::schema::{InvalidLabel, Label};

#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Input rejected by the model (shape, dtype)
    #[error("input rejected: {0}")]
    Input(String),
    /// Model runtime failed while running
    #[error("inference failed: {0}")]
    Runtime(String),
    /// Output could not be read as a 0/1 label
    #[error("unexpected output: {0}")]
    Output(String),
    #[error(transparent)]
    Label(#[from] InvalidLabel),
}

/// Trait for loaded predictive models (linear JSON, ONNX, ...)
///
/// Implementations must be deterministic and free of observable side
/// effects, and callable from many threads at once.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<Label, ClassifierError>;

    /// Trained input width, if the artifact declares it
    fn input_dim(&self) -> Option<usize>;

    /// Short backend name for status output
    fn kind(&self) -> &'static str;
}

/// Shared, read-only classifier reference
pub type ClassifierHandle = Arc<dyn Classifier>;

impl std::fmt::Debug for dyn Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("kind", &self.kind())
            .field("input_dim", &self.input_dim())
            .finish()
    }
}
