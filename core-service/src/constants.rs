//! Central Configuration Constants
//!
//! Single source of truth for configuration defaults.

/// Default directory model artifacts are read from
pub const DEFAULT_MODELS_DIR: &str = "saved_models";

/// Environment variable overriding the models directory
pub const ENV_MODELS_DIR: &str = "MODELS_DIR";

/// Environment variable naming a JSON registry config file
pub const ENV_MODEL_CONFIG: &str = "MODEL_CONFIG";

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

/// Get models directory override from environment, if set
pub fn get_models_dir() -> Option<String> {
    non_empty_env(ENV_MODELS_DIR)
}

/// Get registry config path from environment, if set
pub fn get_model_config() -> Option<String> {
    non_empty_env(ENV_MODEL_CONFIG)
}
