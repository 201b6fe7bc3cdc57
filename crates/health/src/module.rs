//! Health module

use crate::indicator::HealthIndicator;
use config::ModuleContext;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use types::{ComponentHealth, HealthReport, ModuleError};

/// Upper bound for a single indicator check
const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Liveness and readiness reporter
#[derive(Debug, Clone)]
pub struct HealthModule {
    started_at: Instant,
    version: String,
    indicators: Vec<Arc<dyn HealthIndicator>>,
    check_timeout: Duration,
}

impl HealthModule {
    pub const NAME: &'static str = "health";

    /// Initialize with defaults. The context is accepted for a uniform module
    /// interface; the health module reads no settings from it.
    pub fn init(ctx: &ModuleContext) -> Result<Self, ModuleError> {
        tracing::debug!(profile = %ctx.profile(), "Configuring health module");

        Ok(Self {
            started_at: Instant::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            indicators: Vec::new(),
            check_timeout: DEFAULT_CHECK_TIMEOUT,
        })
    }

    /// Attach a readiness indicator
    pub fn with_indicator(mut self, indicator: Arc<dyn HealthIndicator>) -> Self {
        tracing::debug!(indicator = indicator.name(), "Health indicator registered");
        self.indicators.push(indicator);
        self
    }

    pub fn with_check_timeout(mut self, check_timeout: Duration) -> Self {
        self.check_timeout = check_timeout;
        self
    }

    /// Time since initialization
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn indicator_names(&self) -> Vec<&str> {
        self.indicators.iter().map(|i| i.name()).collect()
    }

    /// Process liveness only; never touches indicators
    pub fn liveness(&self) -> HealthReport {
        HealthReport::new(self.version.clone(), self.uptime().as_secs(), Vec::new())
    }

    /// Run every indicator in registration order and aggregate the results
    pub async fn check(&self) -> HealthReport {
        let mut components = Vec::with_capacity(self.indicators.len());

        for indicator in &self.indicators {
            let component = match timeout(self.check_timeout, indicator.check()).await {
                Ok(component) => component,
                Err(_) => ComponentHealth::down(
                    indicator.name(),
                    format!("health check timed out after {}ms", self.check_timeout.as_millis()),
                ),
            };

            if component.status != types::HealthStatus::Up {
                tracing::warn!(
                    component = %component.name,
                    error = component.error_message.as_deref().unwrap_or("unknown"),
                    "Health check failed"
                );
            }
            components.push(component);
        }

        HealthReport::new(self.version.clone(), self.uptime().as_secs(), components)
    }
}
