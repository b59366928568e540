//! Disease Prediction Core
//!
//! Validates clinical form submissions against a per-disease schema and
//! dispatches the resulting feature vector to a pre-loaded classifier.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  FORM INFERENCE PIPELINE                 │
//! ├──────────────────────────────────────────────────────────┤
//! │  raw strings                                             │
//! │      │                                                   │
//! │      ▼                                                   │
//! │  ┌──────────┐   ┌───────────┐   ┌─────────────────────┐  │
//! │  │  Schema  │──►│ Validator │──►│     Dispatcher      │  │
//! │  │ Registry │   │ (batched) │   │  (length check)     │  │
//! │  └──────────┘   └───────────┘   └──────────┬──────────┘  │
//! │                                            ▼             │
//! │                                 ┌─────────────────────┐  │
//! │                                 │   Model Registry    │  │
//! │                                 │ (read-only, shared) │  │
//! │                                 └─────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod constants;
pub mod logic;

pub use logic::config::{ArtifactSpec, ConfigError, RegistryConfig};
pub use logic::dispatch::{DispatchError, DispatchStats, Dispatcher, Verdict};
pub use logic::features::FeatureVector;
pub use logic::model::{
    Classifier, ClassifierError, ClassifierHandle, LinearClassifier, LinearModel, ModelMetadata,
    ModelRegistry, RegistryError,
};
pub use logic::pipeline::{Pipeline, StartupError, SubmitError};
pub use logic::schema::{
    FieldKind, FieldSpec, FormRegistry, FormSchema, Label, SchemaError, UnknownDisease, VerdictMap,
};
pub use logic::validator::{validate, ValidationError};
