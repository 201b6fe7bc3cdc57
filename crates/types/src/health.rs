//! Health reporting types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health status of a component or of the whole service
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Component is responding
    Up,
    /// Component is not responding
    Down,
    /// Component has not been checked yet
    #[default]
    Unknown,
}

/// Result of checking a single component
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentHealth {
    /// Component name
    pub name: String,
    /// Current health status
    pub status: HealthStatus,
    /// Response time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    /// Error message if down
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Check timestamp
    pub checked_at: DateTime<Utc>,
}

/// Aggregated health report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// Overall status, `Up` only when every component is up
    pub status: HealthStatus,
    /// Service version
    pub version: String,
    /// Seconds since the health module was initialized
    pub uptime_seconds: u64,
    /// Report timestamp
    pub timestamp: DateTime<Utc>,
    /// Per-component results
    pub components: Vec<ComponentHealth>,
}

impl ComponentHealth {
    /// Healthy component with its response time
    pub fn up(name: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Up,
            response_time_ms: Some(response_time_ms),
            error_message: None,
            checked_at: Utc::now(),
        }
    }

    /// Unhealthy component with the reason
    pub fn down(name: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Down,
            response_time_ms: None,
            error_message: Some(error_message.into()),
            checked_at: Utc::now(),
        }
    }
}

impl HealthReport {
    /// Build a report, deriving the overall status from the components
    pub fn new(version: impl Into<String>, uptime_seconds: u64, components: Vec<ComponentHealth>) -> Self {
        let status = if components.iter().all(|c| c.status == HealthStatus::Up) {
            HealthStatus::Up
        } else {
            HealthStatus::Down
        };

        Self {
            status,
            version: version.into(),
            uptime_seconds,
            timestamp: Utc::now(),
            components,
        }
    }

    pub fn is_up(&self) -> bool {
        self.status == HealthStatus::Up
    }
}
