//! Health reporting for the Nestera API
//!
//! The health module reports process liveness and aggregates readiness
//! checks contributed by other modules through [`HealthIndicator`].

pub mod indicator;
pub mod module;

pub use indicator::*;
pub use module::*;
