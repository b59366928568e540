//! Configuration module

use std::env;
use std::path::PathBuf;

use disease_predict_core::constants::{get_model_config, get_models_dir};
use disease_predict_core::{ConfigError, RegistryConfig};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Directory holding model artifacts (overrides the config file's)
    pub models_dir: Option<String>,

    /// Optional JSON registry config file
    pub model_config: Option<String>,

    /// Environment (development, production)
    pub environment: String,

    /// Log output format
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            models_dir: get_models_dir(),

            model_config: get_model_config(),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),

            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Registry config: file if given, else defaults; `MODELS_DIR` wins
    pub fn registry_config(&self) -> Result<RegistryConfig, ConfigError> {
        let mut registry = match &self.model_config {
            Some(path) => RegistryConfig::from_file(path)?,
            None => RegistryConfig::default(),
        };

        if let Some(dir) = &self.models_dir {
            registry.models_dir = PathBuf::from(dir);
        }

        Ok(registry)
    }
}
