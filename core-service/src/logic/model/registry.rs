//! Model Registry - every disease's classifier, loaded once at startup
//!
//! All-or-nothing: if any registered form lacks a working classifier of the
//! right input width, construction fails and nothing is served.
//! Read-only afterwards; share it behind an `Arc`.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use super::artifact::{load_artifact, ArtifactError};
use super::classifier::ClassifierHandle;
use crate::logic::config::RegistryConfig;
use crate::logic::schema::FormRegistry;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ArtifactFailure {
    #[error("{disease}: no model artifact configured")]
    NotConfigured { disease: String },
    #[error("{disease}: {source}")]
    Load {
        disease: String,
        #[source]
        source: ArtifactError,
    },
    #[error("{disease}: classifier expects {actual} features but the form has {expected}")]
    DimensionMismatch { disease: String, expected: usize, actual: usize },
    #[error("{disease}: no classifier provided")]
    Missing { disease: String },
    #[error("{disease}: classifier provided for an unregistered form")]
    Unregistered { disease: String },
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("model registry incomplete: {}", summarize(.0))]
    Incomplete(Vec<ArtifactFailure>),
}

fn summarize(failures: &[ArtifactFailure]) -> String {
    failures.iter().map(|f| f.to_string()).collect::<Vec<_>>().join("; ")
}

// ============================================================================
// METADATA
// ============================================================================

/// Model metadata for status output
#[derive(Debug, Clone, Serialize)]
pub struct ModelMetadata {
    pub disease: String,
    /// `None` for injected handles
    pub path: Option<PathBuf>,
    pub kind: String,
    pub features: usize,
    pub sha256: Option<String>,
    pub loaded_at: DateTime<Utc>,
}

struct ModelEntry {
    handle: ClassifierHandle,
    metadata: ModelMetadata,
}

// ============================================================================
// REGISTRY
// ============================================================================

pub struct ModelRegistry {
    models: HashMap<String, ModelEntry>,
    /// Registration order of the forms, for stable listings
    order: Vec<String>,
}

impl ModelRegistry {
    /// Load one artifact per registered form.
    ///
    /// Every form is attempted; all failures are reported together.
    pub fn load(config: &RegistryConfig, forms: &FormRegistry) -> Result<Self, RegistryError> {
        let mut models = HashMap::with_capacity(forms.len());
        let mut failures = Vec::new();

        for (schema, _) in forms.iter() {
            let disease = schema.id().to_string();

            let (Some(path), Some(spec)) = (config.resolve(&disease), config.artifact(&disease)) else {
                log::error!("No model artifact configured for '{}'", disease);
                failures.push(ArtifactFailure::NotConfigured { disease });
                continue;
            };

            let loaded = match load_artifact(&path, spec.sha256.as_deref(), schema.len()) {
                Ok(loaded) => loaded,
                Err(source) => {
                    log::error!("Failed to load model for '{}': {}", disease, source);
                    failures.push(ArtifactFailure::Load { disease, source });
                    continue;
                }
            };

            if let Err(failure) = check_dimension(&disease, schema.len(), &loaded.handle) {
                log::error!("{}", failure);
                failures.push(failure);
                continue;
            }

            let metadata = ModelMetadata {
                disease: disease.clone(),
                path: Some(path),
                kind: loaded.handle.kind().to_string(),
                features: schema.len(),
                sha256: Some(loaded.sha256),
                loaded_at: Utc::now(),
            };
            models.insert(disease, ModelEntry { handle: loaded.handle, metadata });
        }

        Self::finish(models, forms, failures)
    }

    /// Registry from already-built handles (tests, embedded models).
    /// Same completeness and width checks as [`ModelRegistry::load`].
    pub fn from_handles(
        forms: &FormRegistry,
        handles: HashMap<String, ClassifierHandle>,
    ) -> Result<Self, RegistryError> {
        let mut handles = handles;
        let mut models = HashMap::with_capacity(forms.len());
        let mut failures = Vec::new();

        for (schema, _) in forms.iter() {
            let disease = schema.id().to_string();
            let Some(handle) = handles.remove(&disease) else {
                failures.push(ArtifactFailure::Missing { disease });
                continue;
            };

            if let Err(failure) = check_dimension(&disease, schema.len(), &handle) {
                failures.push(failure);
                continue;
            }

            let metadata = ModelMetadata {
                disease: disease.clone(),
                path: None,
                kind: handle.kind().to_string(),
                features: schema.len(),
                sha256: None,
                loaded_at: Utc::now(),
            };
            models.insert(disease, ModelEntry { handle, metadata });
        }

        let mut extra: Vec<String> = handles.into_keys().collect();
        extra.sort();
        failures.extend(extra.into_iter().map(|disease| ArtifactFailure::Unregistered { disease }));

        Self::finish(models, forms, failures)
    }

    fn finish(
        models: HashMap<String, ModelEntry>,
        forms: &FormRegistry,
        failures: Vec<ArtifactFailure>,
    ) -> Result<Self, RegistryError> {
        if !failures.is_empty() {
            return Err(RegistryError::Incomplete(failures));
        }

        log::info!("Model registry ready: {} classifiers", models.len());
        Ok(Self { models, order: forms.ids().map(str::to_string).collect() })
    }

    pub fn get(&self, disease: &str) -> Option<&ClassifierHandle> {
        self.models.get(disease).map(|e| &e.handle)
    }

    /// Metadata in form registration order
    pub fn metadata(&self) -> Vec<&ModelMetadata> {
        self.order
            .iter()
            .filter_map(|id| self.models.get(id))
            .map(|e| &e.metadata)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

fn check_dimension(
    disease: &str,
    expected: usize,
    handle: &ClassifierHandle,
) -> Result<(), ArtifactFailure> {
    match handle.input_dim() {
        Some(actual) if actual != expected => Err(ArtifactFailure::DimensionMismatch {
            disease: disease.to_string(),
            expected,
            actual,
        }),
        _ => Ok(()),
    }
}

// ============================================================================
// TESTS
// ============================================================================
