//! Shared types for the Nestera API
//!
//! This crate contains the domain types shared by the configuration layer,
//! the feature modules and the HTTP entry point.

pub mod error;
pub mod health;
pub mod network;

// Re-export commonly used types
pub use error::{BootstrapError, ConfigError, ModuleError, Result, RpcError};
pub use health::{ComponentHealth, HealthReport, HealthStatus};
pub use network::StellarNetwork;
