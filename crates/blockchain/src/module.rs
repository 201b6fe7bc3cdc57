//! Blockchain feature module

use crate::{contract::ContractId, rpc::{LatestLedger, SorobanRpcClient}};
use async_trait::async_trait;
use config::{BlockchainSettings, ModuleContext};
use health::HealthIndicator;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use types::{ComponentHealth, ModuleError, RpcError, StellarNetwork};

/// Network the module is bound to, as reported by `GET /blockchain/network`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDescriptor {
    pub network: StellarNetwork,
    pub passphrase: String,
    pub contract_id: ContractId,
    pub rpc_url: String,
}

/// Connection to the Soroban RPC node serving the savings contract
#[derive(Debug, Clone)]
pub struct BlockchainModule {
    descriptor: NetworkDescriptor,
    client: SorobanRpcClient,
}

impl BlockchainModule {
    pub const NAME: &'static str = "blockchain";

    /// Initialize from the `BlockchainSettings` section of the context.
    ///
    /// No network call is made unless `blockchain_verify_on_startup` is set,
    /// in which case the node must answer `getNetwork` with the expected
    /// passphrase.
    pub async fn init(ctx: &ModuleContext) -> Result<Self, ModuleError> {
        let settings: BlockchainSettings = ctx.settings()?;

        let network: StellarNetwork = settings
            .stellar_network
            .parse()
            .map_err(ModuleError::InvalidSettings)?;
        let contract_id: ContractId = settings
            .contract_id
            .parse()
            .map_err(ModuleError::InvalidSettings)?;
        let passphrase = resolve_passphrase(network, settings.network_passphrase.as_deref())?;

        let client = SorobanRpcClient::new(
            settings.soroban_rpc_url.clone(),
            Duration::from_secs(settings.blockchain_timeout_seconds),
        )?;

        tracing::debug!(
            network = %network,
            contract_id = %contract_id,
            rpc_url = %settings.soroban_rpc_url,
            "Configuring blockchain module"
        );

        let module = Self {
            descriptor: NetworkDescriptor {
                network,
                passphrase,
                contract_id,
                rpc_url: settings.soroban_rpc_url,
            },
            client,
        };

        if settings.blockchain_verify_on_startup {
            module.verify_network().await?;
        }

        Ok(module)
    }

    pub fn network(&self) -> &NetworkDescriptor {
        &self.descriptor
    }

    pub fn contract_id(&self) -> &ContractId {
        &self.descriptor.contract_id
    }

    pub fn rpc_url(&self) -> &str {
        self.client.url()
    }

    /// Latest ledger known to the node
    pub async fn latest_ledger(&self) -> Result<LatestLedger, RpcError> {
        self.client.get_latest_ledger().await
    }

    /// Readiness indicator backed by the node's `getHealth`
    pub fn health_indicator(&self) -> Arc<dyn HealthIndicator> {
        Arc::new(SorobanHealthIndicator {
            client: self.client.clone(),
        })
    }

    async fn verify_network(&self) -> Result<(), ModuleError> {
        let info = self.client.get_network().await?;
        if info.passphrase != self.descriptor.passphrase {
            return Err(ModuleError::NetworkMismatch {
                expected: self.descriptor.passphrase.clone(),
                actual: info.passphrase,
            });
        }

        tracing::info!(
            network = %self.descriptor.network,
            protocol_version = info.protocol_version,
            "Soroban RPC network verified"
        );
        Ok(())
    }
}

/// An explicit passphrase wins; otherwise the well-known one for the network
fn resolve_passphrase(network: StellarNetwork, configured: Option<&str>) -> Result<String, ModuleError> {
    match (configured, network.passphrase()) {
        (Some(passphrase), _) => Ok(passphrase.to_string()),
        (None, Some(known)) => Ok(known.to_string()),
        (None, None) => Err(ModuleError::InvalidSettings(format!(
            "network_passphrase is required for the {} network",
            network
        ))),
    }
}

/// Reports the Soroban RPC node as a health component
#[derive(Debug)]
pub struct SorobanHealthIndicator {
    client: SorobanRpcClient,
}

impl SorobanHealthIndicator {
    pub const NAME: &'static str = "soroban-rpc";
}

#[async_trait]
impl HealthIndicator for SorobanHealthIndicator {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn check(&self) -> ComponentHealth {
        let start = Instant::now();
        match self.client.get_health().await {
            Ok(health) if health.is_healthy() => {
                ComponentHealth::up(Self::NAME, start.elapsed().as_millis() as u64)
            }
            Ok(health) => ComponentHealth::down(Self::NAME, format!("node reports status '{}'", health.status)),
            Err(e) => ComponentHealth::down(Self::NAME, e.to_string()),
        }
    }
}
