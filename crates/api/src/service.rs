//! Top-level application service

use blockchain::BlockchainModule;
use chrono::{DateTime, Utc};
use config::{EnvironmentProfile, ModuleContext, ServerSettings};
use health::HealthModule;
use serde::Serialize;
use types::{HealthStatus, ModuleError, StellarNetwork};

/// Body of `GET /`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub environment: String,
    pub network: StellarNetwork,
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
}

/// Summarizes the running service for the root endpoint
#[derive(Debug, Clone)]
pub struct AppService {
    service_name: String,
    environment: EnvironmentProfile,
    network: StellarNetwork,
    health: HealthModule,
}

impl AppService {
    pub fn new(
        ctx: &ModuleContext,
        health: HealthModule,
        blockchain: &BlockchainModule,
    ) -> Result<Self, ModuleError> {
        let server: ServerSettings = ctx.settings()?;

        Ok(Self {
            service_name: server.service_name,
            environment: ctx.profile().clone(),
            network: blockchain.network().network,
            health,
        })
    }

    pub async fn info(&self) -> ServiceInfo {
        let report = self.health.check().await;

        ServiceInfo {
            service: self.service_name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: self.environment.as_str().to_string(),
            network: self.network,
            status: report.status,
            timestamp: Utc::now(),
        }
    }
}
