//! Logging pipeline selection
//!
//! The pipeline is a pure function of the environment profile: production
//! gets structured records at info, every other profile gets single-line
//! colorized text at debug.

use crate::profile::EnvironmentProfile;
use serde::Serialize;
use std::fmt;

/// Log verbosity, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output transport of the logging pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum LogTransport {
    /// Machine-parsable JSON lines
    Structured,
    /// Text for humans
    HumanReadable { single_line: bool, colorize: bool },
}

/// Logging configuration shared by every module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoggingPipelineConfig {
    pub level: LogLevel,
    pub transport: LogTransport,
}

impl LoggingPipelineConfig {
    /// Select the pipeline for a profile
    pub fn select(profile: &EnvironmentProfile) -> Self {
        if profile.is_production() {
            Self {
                level: LogLevel::Info,
                transport: LogTransport::Structured,
            }
        } else {
            Self {
                level: LogLevel::Debug,
                transport: LogTransport::HumanReadable {
                    single_line: true,
                    colorize: true,
                },
            }
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self.transport, LogTransport::Structured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn human_debug() -> LoggingPipelineConfig {
        LoggingPipelineConfig {
            level: LogLevel::Debug,
            transport: LogTransport::HumanReadable {
                single_line: true,
                colorize: true,
            },
        }
    }

    #[test]
    fn test_production_is_structured_info() {
        let pipeline = LoggingPipelineConfig::select(&EnvironmentProfile::Production);
        assert_eq!(pipeline.level, LogLevel::Info);
        assert_eq!(pipeline.transport, LogTransport::Structured);
        assert!(pipeline.is_structured());
    }

    #[test]
    fn test_non_production_profiles_fall_back_to_human_debug() {
        for profile in [
            EnvironmentProfile::Development,
            EnvironmentProfile::Test,
            EnvironmentProfile::Other("staging".to_string()),
            EnvironmentProfile::Other(String::new()),
            EnvironmentProfile::Other("PRODUCTION".to_string()),
        ] {
            assert_eq!(LoggingPipelineConfig::select(&profile), human_debug(), "profile {}", profile);
        }
    }

    #[test]
    fn test_selection_is_deterministic() {
        let first = LoggingPipelineConfig::select(&EnvironmentProfile::Production);
        for _ in 0..10 {
            assert_eq!(LoggingPipelineConfig::select(&EnvironmentProfile::Production), first);
        }
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Trace < LogLevel::Error);
        assert_eq!(LogLevel::Info.to_string(), "info");
    }
}
