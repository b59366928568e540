//! Model Module - classifier handles and the process-wide registry
//!
//! Artifact format stays behind the `Classifier` trait, so the dispatcher
//! never knows whether a model is a JSON linear model or an ONNX graph.

pub mod classifier;
pub mod linear;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod artifact;
pub mod registry;

// Re-export common types
pub use classifier::{Classifier, ClassifierError, ClassifierHandle};
pub use linear::{LinearClassifier, LinearModel, ScalerParams};
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;
pub use artifact::{load_artifact, sha256_hex, ArtifactError};
pub use registry::{ArtifactFailure, ModelMetadata, ModelRegistry, RegistryError};
