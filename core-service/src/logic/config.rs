//! Registry Configuration
//!
//! Where each disease's model artifact lives. Can be loaded from a JSON
//! file or built in code.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::DEFAULT_MODELS_DIR;
use crate::logic::schema::forms::BUILTIN_IDS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ============================================================================
// ARTIFACT SPEC
// ============================================================================

/// One model artifact entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSpec {
    /// File name under `models_dir`, or an absolute path
    pub file: String,
    /// Expected lowercase hex SHA-256 of the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

impl ArtifactSpec {
    pub fn new(file: impl Into<String>) -> Self {
        Self { file: file.into(), sha256: None }
    }

    pub fn with_sha256(mut self, sha256: impl Into<String>) -> Self {
        self.sha256 = Some(sha256.into());
        self
    }
}

// ============================================================================
// REGISTRY CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Directory relative artifact file names resolve against
    pub models_dir: PathBuf,
    /// Disease id → artifact
    pub artifacts: BTreeMap<String, ArtifactSpec>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        let artifacts = BUILTIN_IDS
            .iter()
            .map(|id| (id.to_string(), ArtifactSpec::new(format!("{id}_model.onnx"))))
            .collect();

        Self { models_dir: PathBuf::from(DEFAULT_MODELS_DIR), artifacts }
    }
}

impl RegistryConfig {
    pub fn new(models_dir: impl Into<PathBuf>) -> Self {
        Self { models_dir: models_dir.into(), artifacts: BTreeMap::new() }
    }

    pub fn with_artifact(mut self, id: impl Into<String>, spec: ArtifactSpec) -> Self {
        self.artifacts.insert(id.into(), spec);
        self
    }

    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        serde_json::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    pub fn artifact(&self, id: &str) -> Option<&ArtifactSpec> {
        self.artifacts.get(id)
    }

    /// Full path of a disease's artifact, if configured
    pub fn resolve(&self, id: &str) -> Option<PathBuf> {
        self.artifact(id).map(|spec| {
            let file = Path::new(&spec.file);
            if file.is_absolute() {
                file.to_path_buf()
            } else {
                self.models_dir.join(file)
            }
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
