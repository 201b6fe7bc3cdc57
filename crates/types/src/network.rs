//! Stellar network identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stellar network the contract is deployed on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StellarNetwork {
    Testnet,
    Mainnet,
    Futurenet,
    /// Local quickstart node, passphrase must be configured
    Standalone,
}

impl StellarNetwork {
    /// All accepted network names
    pub const NAMES: [&'static str; 4] = ["testnet", "mainnet", "futurenet", "standalone"];

    /// Well-known network passphrase, `None` for standalone
    pub fn passphrase(&self) -> Option<&'static str> {
        match self {
            StellarNetwork::Testnet => Some("Test SDF Network ; September 2015"),
            StellarNetwork::Mainnet => Some("Public Global Stellar Network ; September 2015"),
            StellarNetwork::Futurenet => Some("Test SDF Future Network ; October 2022"),
            StellarNetwork::Standalone => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StellarNetwork::Testnet => "testnet",
            StellarNetwork::Mainnet => "mainnet",
            StellarNetwork::Futurenet => "futurenet",
            StellarNetwork::Standalone => "standalone",
        }
    }
}

impl fmt::Display for StellarNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StellarNetwork {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "testnet" => Ok(StellarNetwork::Testnet),
            "mainnet" | "public" => Ok(StellarNetwork::Mainnet),
            "futurenet" => Ok(StellarNetwork::Futurenet),
            "standalone" | "local" => Ok(StellarNetwork::Standalone),
            other => Err(format!("Unknown Stellar network: {}", other)),
        }
    }
}
