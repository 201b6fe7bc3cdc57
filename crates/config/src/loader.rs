//! Configuration loader implementation

use crate::{configuration::Configuration, schema::Schema, settings::default_service_name};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    value::{Dict, Value},
    Figment,
};
use std::path::{Path, PathBuf};
use types::ConfigError;

/// Configuration loader that layers compiled-in defaults, an optional YAML
/// file and environment variables.
///
/// The loader never checks presence or types; that is the validator's job.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    env_keys: Vec<&'static str>,
    defaults: Dict,
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Variable naming an optional YAML configuration file
    pub const CONFIG_PATH_VAR: &'static str = "CONFIG_PATH";
    /// Prefix of free-form variables; `__` separates nested keys
    pub const ENV_PREFIX: &'static str = "NESTERA_";

    /// Loader reading the variables declared by `schema`
    pub fn new(schema: &Schema) -> Self {
        let mut defaults = Dict::new();
        defaults.insert("service_name".to_string(), Value::from(default_service_name()));

        Self {
            env_keys: schema.keys().collect(),
            defaults,
            config_path: None,
        }
    }

    /// Add a compiled-in default
    pub fn with_default(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.defaults.insert(key.to_string(), value.into());
        self
    }

    /// Read this YAML file instead of the one named by `CONFIG_PATH`
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Load configuration from all sources
    pub fn load(&self) -> Result<Configuration, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(&self.defaults));

        if let Some(path) = self.resolve_config_path() {
            if !path.exists() {
                return Err(ConfigError::Source(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            figment = figment.merge(Yaml::file(path));
        }

        let figment = figment
            // Declared keys, unprefixed (PORT, SOROBAN_RPC_URL, ...)
            .merge(Env::raw().only(&self.env_keys))
            // Free-form keys (NESTERA_FEATURES__BETA -> features.beta)
            .merge(Env::prefixed(Self::ENV_PREFIX).split("__"));

        Self::extract(figment)
    }

    /// Load defaults plus a YAML string, ignoring the environment
    pub fn load_from_str(&self, yaml_content: &str) -> Result<Configuration, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(&self.defaults))
            .merge(Yaml::string(yaml_content));

        Self::extract(figment)
    }

    /// Write an example configuration file with every default and placeholder
    pub fn write_example<P: AsRef<Path>>(schema: &Schema, path: P) -> Result<(), ConfigError> {
        let yaml_content = serde_yaml::to_string(&schema.example_values())
            .map_err(|e| ConfigError::Source(format!("Failed to serialize example configuration: {}", e)))?;

        std::fs::write(path.as_ref(), yaml_content).map_err(|e| {
            ConfigError::Source(format!(
                "Failed to write example configuration file {}: {}",
                path.as_ref().display(),
                e
            ))
        })
    }

    fn resolve_config_path(&self) -> Option<PathBuf> {
        self.config_path.clone().or_else(|| {
            std::env::var(Self::CONFIG_PATH_VAR)
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
        })
    }

    fn extract(figment: Figment) -> Result<Configuration, ConfigError> {
        figment
            .extract::<Dict>()
            .map(Configuration::from_dict)
            .map_err(|e| ConfigError::Source(e.to_string()))
    }
}
