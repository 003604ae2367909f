//! Layered configuration: defaults, optional TOML file, environment, CLI flags.

use crate::errors::Result;
use config as config_rs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "kagglegenius.toml";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Environment variables consulted for the credential when no other layer sets one.
pub const CREDENTIAL_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeniusConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for GeniusConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 120,
        }
    }
}

/// Values supplied on the command line; they take precedence over every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub model: Option<String>,
}

/// Configuration failures surface as [`GeniusError::Configuration`](crate::errors::GeniusError::Configuration).
pub fn load_config(overrides: &ConfigOverrides) -> Result<GeniusConfig> {
    let defaults = GeniusConfig::default();

    let mut builder = config_rs::Config::builder()
        .set_default("endpoint", defaults.endpoint)?
        .set_default("model", defaults.model)?
        .set_default("timeout_secs", defaults.timeout_secs as i64)?;

    // An explicit path must exist; the default file is optional.
    builder = match &overrides.config_path {
        Some(path) => builder.add_source(config_rs::File::from(path.as_path()).required(true)),
        None => builder.add_source(config_rs::File::with_name(DEFAULT_CONFIG_FILE).required(false)),
    };

    builder = builder
        .add_source(config_rs::Environment::with_prefix("KAGGLEGENIUS").try_parsing(true))
        .set_override_option("api_key", overrides.api_key.clone())?
        .set_override_option("endpoint", overrides.endpoint.clone())?
        .set_override_option("model", overrides.model.clone())?;

    let mut cfg: GeniusConfig = builder.build()?.try_deserialize()?;

    if cfg.api_key.is_none() {
        cfg.api_key = CREDENTIAL_ENV_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok())
            .filter(|key| !key.trim().is_empty());
    }

    Ok(cfg)
}
