//! Form Inference Pipeline
//!
//! ```text
//! raw strings ──► validate ──► FeatureVector ──► Dispatcher ──► Verdict
//!                    │
//!                    └── ValidationError (classifier never invoked)
//! ```

use std::sync::Arc;

use thiserror::Error;

use crate::logic::config::RegistryConfig;
use crate::logic::dispatch::{DispatchError, Dispatcher, Verdict};
use crate::logic::model::{ModelRegistry, RegistryError};
use crate::logic::schema::{FormRegistry, SchemaError};
use crate::logic::validator::{validate, ValidationError};

#[derive(Debug, Error)]
pub enum SubmitError {
    /// Fix-your-input errors
    #[error("invalid form input: {0}")]
    Validation(ValidationError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub struct Pipeline {
    forms: Arc<FormRegistry>,
    dispatcher: Dispatcher,
}

impl Pipeline {
    pub fn new(forms: Arc<FormRegistry>, models: Arc<ModelRegistry>) -> Self {
        let dispatcher = Dispatcher::new(Arc::clone(&forms), models);
        Self { forms, dispatcher }
    }

    /// Built-in forms plus every model artifact named by `config`
    pub fn from_config(config: &RegistryConfig) -> Result<Self, StartupError> {
        let forms = FormRegistry::builtin()?;
        let models = ModelRegistry::load(config, &forms)?;
        Ok(Self::new(Arc::new(forms), Arc::new(models)))
    }

    pub fn forms(&self) -> &FormRegistry {
        &self.forms
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Validate one submission and, if clean, classify it.
    ///
    /// # Panics
    ///
    /// If `raw` does not have one value per schema field.
    pub fn submit<S: AsRef<str>>(&self, disease: &str, raw: &[S]) -> Result<Verdict, SubmitError> {
        let (schema, _) = self.forms.get(disease).map_err(DispatchError::from)?;

        let features = validate(schema, raw).map_err(|e| {
            log::debug!("Submission for '{}' rejected: {}", disease, e);
            SubmitError::Validation(e)
        })?;

        Ok(self.dispatcher.predict(disease, &features)?)
    }
}
