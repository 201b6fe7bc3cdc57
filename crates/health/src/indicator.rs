//! Health indicator trait

use async_trait::async_trait;
use std::fmt::Debug;
use types::ComponentHealth;

/// A component that can report its own health
#[async_trait]
pub trait HealthIndicator: Send + Sync + Debug {
    /// Name shown in health reports
    fn name(&self) -> &str;

    /// Check the component. Failures are reported as a down component, not as an error.
    async fn check(&self) -> ComponentHealth;
}
