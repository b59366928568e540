//! Linear Classifier - JSON model artifact
//!
//! Decision function of a fitted linear model (logistic regression,
//! linear SVM), with the training scaler folded in:
//!
//! ```text
//! z = intercept + Σ wᵢ · (xᵢ − meanᵢ) / scaleᵢ      label = 1 iff z > 0
//! ```

use serde::{Deserialize, Serialize};

use super::classifier::{Classifier, ClassifierError};
use crate::logic::features::FeatureVector;
use crate::logic::schema::Label;

/// Standard scaler parameters from training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Serialized form of a linear model artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// Free-form estimator name ("logistic_regression", "linear_svc", ...)
    #[serde(default = "default_kind")]
    pub kind: String,
    pub weights: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler: Option<ScalerParams>,
}

fn default_kind() -> String {
    "linear".to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearClassifier {
    model: LinearModel,
}

impl LinearClassifier {
    /// Validate model parameters. Returns a description of the first defect.
    pub fn new(model: LinearModel) -> Result<Self, String> {
        if model.weights.is_empty() {
            return Err("model has no weights".to_string());
        }
        if !model.intercept.is_finite() || model.weights.iter().any(|w| !w.is_finite()) {
            return Err("model parameters must be finite".to_string());
        }

        if let Some(scaler) = &model.scaler {
            let n = model.weights.len();
            if scaler.mean.len() != n || scaler.scale.len() != n {
                return Err(format!(
                    "scaler has {}/{} entries for {} weights",
                    scaler.mean.len(),
                    scaler.scale.len(),
                    n
                ));
            }
            if scaler.mean.iter().chain(&scaler.scale).any(|v| !v.is_finite()) {
                return Err("scaler parameters must be finite".to_string());
            }
            if scaler.scale.iter().any(|&s| s == 0.0) {
                return Err("scaler has a zero scale".to_string());
            }
        }

        Ok(Self { model })
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, String> {
        let model: LinearModel =
            serde_json::from_slice(bytes).map_err(|e| format!("invalid linear model JSON: {}", e))?;
        Self::new(model)
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    /// Signed distance to the decision boundary
    pub fn decision_function(&self, features: &FeatureVector) -> Result<f64, ClassifierError> {
        let n = self.model.weights.len();
        if features.len() != n {
            return Err(ClassifierError::Input(format!(
                "expected {} features, got {}",
                n,
                features.len()
            )));
        }

        let z = match &self.model.scaler {
            Some(scaler) => features
                .iter()
                .zip(&self.model.weights)
                .zip(scaler.mean.iter().zip(&scaler.scale))
                .map(|((x, w), (mean, scale))| w * (x - mean) / scale)
                .sum::<f64>(),
            None => features.iter().zip(&self.model.weights).map(|(x, w)| w * x).sum::<f64>(),
        };

        Ok(self.model.intercept + z)
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<Label, ClassifierError> {
        let z = self.decision_function(features)?;
        if !z.is_finite() {
            return Err(ClassifierError::Output(format!("non-finite decision value {}", z)));
        }
        Ok(if z > 0.0 { Label::Positive } else { Label::Negative })
    }

    fn input_dim(&self) -> Option<usize> {
        Some(self.model.weights.len())
    }

    fn kind(&self) -> &'static str {
        "linear"
    }
}
