//! Configuration management for the Nestera API
//!
//! This crate handles loading configuration from compiled-in defaults, an
//! optional YAML file and environment variables, validating it against the
//! application schema, and deriving the environment profile and logging
//! pipeline from the result.

pub mod configuration;
pub mod context;
pub mod loader;
pub mod logging;
pub mod profile;
pub mod schema;
pub mod settings;
pub mod validation;

pub use configuration::Configuration;
pub use context::ModuleContext;
pub use loader::ConfigLoader;
pub use logging::{LogLevel, LogTransport, LoggingPipelineConfig};
pub use profile::EnvironmentProfile;
pub use schema::{Field, FieldKind, Schema};
pub use settings::*;
pub use validation::SchemaValidator;
