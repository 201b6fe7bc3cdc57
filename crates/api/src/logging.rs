//! Logging pipeline installation

use config::{LogTransport, LoggingPipelineConfig};
use tracing::Subscriber;
use tracing_subscriber::{fmt, fmt::MakeWriter, layer::SubscriberExt, EnvFilter};
use types::BootstrapError;

/// Build the subscriber for a pipeline, writing to `writer`.
///
/// The filter is fixed to the selected level; `RUST_LOG` is not consulted.
pub fn build_subscriber<W>(config: &LoggingPipelineConfig, writer: W) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(EnvFilter::new(config.level.as_str()));

    match config.transport {
        LogTransport::Structured => Box::new(
            registry.with(fmt::layer().json().with_ansi(false).with_writer(writer)),
        ),
        LogTransport::HumanReadable {
            single_line: true,
            colorize,
        } => Box::new(
            registry.with(fmt::layer().compact().with_ansi(colorize).with_writer(writer)),
        ),
        LogTransport::HumanReadable {
            single_line: false,
            colorize,
        } => Box::new(
            registry.with(fmt::layer().pretty().with_ansi(colorize).with_writer(writer)),
        ),
    }
}

/// Install the pipeline as the process-wide default subscriber
pub fn install<W>(config: &LoggingPipelineConfig, writer: W) -> Result<(), BootstrapError>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing::subscriber::set_global_default(build_subscriber(config, writer))
        .map_err(|e| BootstrapError::Logging(e.to_string()))?;

    announce(config);
    Ok(())
}

/// First record written through a freshly installed pipeline
pub fn announce(config: &LoggingPipelineConfig) {
    tracing::debug!(
        level = %config.level,
        structured = config.is_structured(),
        "Logging initialized"
    );
}


#[cfg(test)]
mod tests {
    use super::test_support::CapturedLogs;
    use super::*;
    use config::EnvironmentProfile;

    fn emit_sample_events() {
        tracing::trace!("trace event");
        tracing::debug!("debug event");
        tracing::info!(module = "health", order = 1, "Module ready");
        tracing::warn!("warn event");
    }

    #[test]
    fn test_production_emits_json_at_info() {
        let logs = CapturedLogs::default();
        let pipeline = LoggingPipelineConfig::select(&EnvironmentProfile::Production);

        tracing::subscriber::with_default(build_subscriber(&pipeline, logs.clone()), emit_sample_events);

        let lines = logs.lines();
        assert_eq!(lines.len(), 2);
        for line in &lines {
            let record: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(record.get("level").is_some());
        }
        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["level"], "INFO");
        assert_eq!(first["fields"]["message"], "Module ready");
        assert_eq!(first["fields"]["module"], "health");
        assert!(!logs.contents().contains("debug event"));
        assert!(!logs.contents().contains('\u{1b}'));
    }

    #[test]
    fn test_development_emits_single_line_text_at_debug() {
        let logs = CapturedLogs::default();
        let pipeline = LoggingPipelineConfig::select(&EnvironmentProfile::Development);

        tracing::subscriber::with_default(build_subscriber(&pipeline, logs.clone()), emit_sample_events);

        let lines = logs.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("debug event"));
        assert!(lines[1].contains("Module ready"));
        assert!(!logs.contents().contains("trace event"));
        assert!(serde_json::from_str::<serde_json::Value>(&lines[1]).is_err());
        // colorized
        assert!(logs.contents().contains('\u{1b}'));
    }

    #[test]
    fn test_unrecognized_profile_uses_development_pipeline() {
        let logs = CapturedLogs::default();
        let pipeline = LoggingPipelineConfig::select(&EnvironmentProfile::parse("staging"));

        tracing::subscriber::with_default(build_subscriber(&pipeline, logs.clone()), || {
            tracing::debug!("visible at debug");
        });

        assert!(logs.contents().contains("visible at debug"));
    }
}
