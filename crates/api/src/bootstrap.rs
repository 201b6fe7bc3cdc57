//! Configuration gate run before anything else starts

use config::{
    schema, ConfigLoader, Configuration, EnvironmentProfile, LoggingPipelineConfig, SchemaValidator,
};
use std::env;
use types::BootstrapError;

/// Validated inputs for composition
#[derive(Debug, Clone)]
pub struct Prepared {
    pub config: Configuration,
    pub profile: EnvironmentProfile,
    pub logging: LoggingPipelineConfig,
}

/// A bootstrap failure with the pipeline it should be reported through
#[derive(Debug)]
pub struct Rejected {
    pub error: BootstrapError,
    pub logging: LoggingPipelineConfig,
}

/// Load, validate and select the logging pipeline
pub fn prepare(loader: &ConfigLoader) -> Result<Prepared, Rejected> {
    let raw = loader.load().map_err(|e| Rejected {
        error: e.into(),
        logging: failure_pipeline(None),
    })?;

    prepare_config(raw.clone()).map_err(|error| Rejected {
        error,
        logging: failure_pipeline(Some(&raw)),
    })
}

/// Pipeline for a failed bootstrap. The profile comes from the loaded but
/// unvalidated configuration, or from the raw `APP_ENV` variable when
/// loading itself failed.
pub fn failure_pipeline(raw: Option<&Configuration>) -> LoggingPipelineConfig {
    let profile = match raw {
        Some(raw) => EnvironmentProfile::from_config(raw),
        None => env::var("APP_ENV")
            .map(|name| EnvironmentProfile::parse(&name))
            .unwrap_or_default(),
    };
    LoggingPipelineConfig::select(&profile)
}

/// Validate an already loaded configuration and select the logging pipeline
pub fn prepare_config(raw: Configuration) -> Result<Prepared, BootstrapError> {
    let config = SchemaValidator::validate(raw, &schema::application())?;
    let profile = EnvironmentProfile::from_config(&config);
    let logging = LoggingPipelineConfig::select(&profile);

    Ok(Prepared {
        config,
        profile,
        logging,
    })
}
