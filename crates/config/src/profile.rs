//! Environment profile

use crate::configuration::Configuration;
use serde::Serialize;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Resolved runtime mode of the process
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentProfile {
    Development,
    Production,
    Test,
    /// Any value not recognized above, kept verbatim
    Other(String),
}

impl EnvironmentProfile {
    /// Configuration key holding the profile name
    pub const KEY: &'static str = "app_env";

    /// Derive the profile from configuration. An unset key means development.
    pub fn from_config(config: &Configuration) -> Self {
        config
            .get_str(Self::KEY)
            .map(Self::parse)
            .unwrap_or(EnvironmentProfile::Development)
    }

    /// Parse a profile name. Matching is exact; anything else becomes `Other`.
    pub fn parse(name: &str) -> Self {
        match name {
            "development" => EnvironmentProfile::Development,
            "production" => EnvironmentProfile::Production,
            "test" => EnvironmentProfile::Test,
            other => EnvironmentProfile::Other(other.to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, EnvironmentProfile::Production)
    }

    pub fn as_str(&self) -> &str {
        match self {
            EnvironmentProfile::Development => "development",
            EnvironmentProfile::Production => "production",
            EnvironmentProfile::Test => "test",
            EnvironmentProfile::Other(name) => name,
        }
    }
}

impl Default for EnvironmentProfile {
    fn default() -> Self {
        EnvironmentProfile::Development
    }
}

impl FromStr for EnvironmentProfile {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for EnvironmentProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
