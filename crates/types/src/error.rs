//! Error types for the Nestera API

use thiserror::Error;

/// Startup error surfaced to the process entry point
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// Configuration failed schema validation
    #[error("Configuration validation failed: {0}")]
    ConfigurationValidation(#[from] ConfigError),

    /// A registered module failed to initialize
    #[error("Module composition failed: {module}: {message}")]
    ModuleComposition { module: String, message: String },

    /// The logging pipeline could not be installed
    #[error("Logging initialization failed: {0}")]
    Logging(String),
}

/// Result type alias for bootstrap operations
pub type Result<T> = std::result::Result<T, BootstrapError>;

/// Configuration specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A configuration source could not be read or parsed
    #[error("Configuration source error: {0}")]
    Source(String),

    /// Missing required field
    #[error("Missing required configuration field: {field}")]
    MissingField { field: String },

    /// Value has the wrong type and cannot be coerced
    #[error("Invalid type for {field}: expected {expected}, found {found}")]
    InvalidType {
        field: String,
        expected: String,
        found: String,
    },

    /// Value is outside the allowed set
    #[error("Invalid value for {field}: {value} (allowed: {allowed})")]
    NotAllowed {
        field: String,
        value: String,
        allowed: String,
    },

    /// Numeric value is outside its bounds
    #[error("Value for {field} out of range: {value} (expected {min}..={max})")]
    OutOfRange {
        field: String,
        value: i128,
        min: i128,
        max: i128,
    },

    /// Invalid value
    #[error("Invalid configuration value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Typed extraction from a validated configuration failed
    #[error("Failed to extract {section} settings: {message}")]
    Extract { section: String, message: String },
}

impl ConfigError {
    /// Name of the field the error refers to, when there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::MissingField { field }
            | ConfigError::InvalidType { field, .. }
            | ConfigError::NotAllowed { field, .. }
            | ConfigError::OutOfRange { field, .. }
            | ConfigError::InvalidValue { field, .. } => Some(field),
            ConfigError::Source(_) | ConfigError::Extract { .. } => None,
        }
    }
}

/// Feature module initialization errors
#[derive(Error, Debug)]
pub enum ModuleError {
    /// Module settings are present but unusable
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Settings could not be read from the configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Remote call made during initialization failed
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// Remote node reports a different network than configured
    #[error("Network mismatch: expected '{expected}', node reports '{actual}'")]
    NetworkMismatch { expected: String, actual: String },

    /// HTTP client could not be built
    #[error("Client setup failed: {0}")]
    Client(String),
}

/// JSON-RPC communication errors
#[derive(Error, Debug)]
pub enum RpcError {
    /// Request never produced a response
    #[error("Transport error calling {method}: {message}")]
    Transport { method: String, message: String },

    /// Non-success HTTP status
    #[error("HTTP error calling {method}: {status}")]
    HttpStatus { method: String, status: u16 },

    /// Response body did not match the JSON-RPC envelope
    #[error("Invalid response for {method}: {message}")]
    InvalidResponse { method: String, message: String },

    /// Node returned a JSON-RPC error object
    #[error("RPC error {code} calling {method}: {message}")]
    Remote {
        method: String,
        code: i64,
        message: String,
    },
}

impl BootstrapError {
    /// Wrap a module failure with the module's name
    pub fn module(module: &str, err: impl std::fmt::Display) -> Self {
        BootstrapError::ModuleComposition {
            module: module.to_string(),
            message: err.to_string(),
        }
    }
}
