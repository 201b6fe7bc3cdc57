//! Shared state handed to every feature module at initialization

use crate::{
    configuration::Configuration, logging::LoggingPipelineConfig, profile::EnvironmentProfile,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use types::ConfigError;

/// Validated configuration plus the installed logging pipeline
#[derive(Debug, Clone)]
pub struct ModuleContext {
    config: Configuration,
    logging: Arc<LoggingPipelineConfig>,
    profile: EnvironmentProfile,
}

impl ModuleContext {
    pub fn new(config: Configuration, logging: Arc<LoggingPipelineConfig>) -> Self {
        let profile = EnvironmentProfile::from_config(&config);
        Self {
            config,
            logging,
            profile,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn logging(&self) -> &LoggingPipelineConfig {
        &self.logging
    }

    pub fn profile(&self) -> &EnvironmentProfile {
        &self.profile
    }

    /// Typed settings section for a module
    pub fn settings<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        self.config.extract()
    }
}
