//! Typed settings views over the validated configuration

use serde::{Deserialize, Serialize};

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Service name reported by the root endpoint
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,
}

/// Blockchain module settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockchainSettings {
    /// Stellar network name
    #[serde(default = "default_network")]
    pub stellar_network: String,
    /// Soroban RPC endpoint
    pub soroban_rpc_url: String,
    /// Savings contract id (strkey)
    pub contract_id: String,
    /// Passphrase override, required for standalone networks
    #[serde(default)]
    pub network_passphrase: Option<String>,
    /// RPC request timeout in seconds
    #[serde(default = "default_blockchain_timeout")]
    pub blockchain_timeout_seconds: u64,
    /// Check the node's network during initialization
    #[serde(default)]
    pub blockchain_verify_on_startup: bool,
}

// Default value functions
pub(crate) fn default_service_name() -> String {
    "nestera-api".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_network() -> String {
    "testnet".to_string()
}

fn default_blockchain_timeout() -> u64 {
    10
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
            cors_enabled: default_true(),
        }
    }
}
