//! Model Artifacts - read, verify and deserialize one classifier file
//!
//! Format is chosen by extension:
//! - `.json` → [`LinearClassifier`]
//! - `.onnx` → `OnnxClassifier` (feature `onnx`)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sha2::{Digest, Sha256};
use thiserror::Error;

use super::classifier::ClassifierHandle;
use super::linear::LinearClassifier;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("model artifact not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch { path: PathBuf, expected: String, actual: String },
    #[error("unsupported model format '{extension}' for {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },
    #[error("corrupt model artifact {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}

/// Lowercase hex SHA-256 of the artifact bytes
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// A deserialized artifact plus the digest of the bytes it came from
pub struct LoadedArtifact {
    pub handle: ClassifierHandle,
    pub sha256: String,
}

/// Read an artifact, verify its checksum if one is given, and build a
/// classifier expecting `input_dim` features.
pub fn load_artifact(
    path: &Path,
    expected_sha256: Option<&str>,
    #[cfg_attr(not(feature = "onnx"), allow(unused_variables))] input_dim: usize,
) -> Result<LoadedArtifact, ArtifactError> {
    log::info!("Loading model artifact from: {}", path.display());

    if !path.exists() {
        return Err(ArtifactError::NotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path)
        .map_err(|source| ArtifactError::Io { path: path.to_path_buf(), source })?;
    let digest = sha256_hex(&bytes);

    if let Some(expected) = expected_sha256 {
        if !expected.trim().eq_ignore_ascii_case(&digest) {
            return Err(ArtifactError::ChecksumMismatch {
                path: path.to_path_buf(),
                expected: expected.trim().to_lowercase(),
                actual: digest,
            });
        }
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let corrupt = |reason: String| ArtifactError::Corrupt { path: path.to_path_buf(), reason };

    let handle: ClassifierHandle = match extension.as_str() {
        "json" => Arc::new(LinearClassifier::from_json(&bytes).map_err(corrupt)?),
        #[cfg(feature = "onnx")]
        "onnx" => Arc::new(super::onnx::OnnxClassifier::from_bytes(&bytes, input_dim).map_err(corrupt)?),
        _ => {
            return Err(ArtifactError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            })
        }
    };

    log::info!(
        "Model artifact loaded: {} ({}, {} features)",
        path.display(),
        handle.kind(),
        handle.input_dim().map_or_else(|| "?".to_string(), |d| d.to_string())
    );

    Ok(LoadedArtifact { handle, sha256: digest })
}
