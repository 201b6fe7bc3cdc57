//! Nestera API - Main Application Entry Point

use bootstrap::Rejected;
use clap::Parser;
use config::{schema, ConfigLoader, LoggingPipelineConfig};
use std::{future::Future, path::PathBuf, process::ExitCode};
use tracing::{error, info, warn};
use types::BootstrapError;

mod api;
mod app;
mod bootstrap;
mod controller;
mod logging;
mod service;

use app::Application;

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Parser)]
#[command(name = "nestera-api", version, about = "Nestera savings backend")]
struct Cli {
    /// Load and validate configuration, log it, then exit
    #[arg(long)]
    check_config: bool,

    /// Write an example configuration file to PATH, then exit
    #[arg(long, value_name = "PATH")]
    example_config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv_result = dotenv::dotenv();
    let cli = Cli::parse();
    let schema = schema::application();

    if let Some(path) = &cli.example_config {
        return match ConfigLoader::write_example(&schema, path) {
            Ok(()) => {
                println!("Example configuration written to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    let status = start(
        &cli,
        &ConfigLoader::new(&schema),
        dotenv_result,
        |pipeline| logging::install(pipeline, std::io::stdout),
        app::shutdown_signal(),
    )
    .await;

    ExitCode::from(status)
}

/// Bootstrap and serve until `shutdown`, returning the process exit status.
///
/// `install` is called exactly once, with the pipeline selected from the
/// validated configuration or, on failure, from whatever was loaded.
async fn start<I, F>(
    cli: &Cli,
    loader: &ConfigLoader,
    dotenv_result: dotenv::Result<PathBuf>,
    install: I,
    shutdown: F,
) -> u8
where
    I: FnOnce(&LoggingPipelineConfig) -> Result<(), BootstrapError>,
    F: Future<Output = ()> + Send + 'static,
{
    let prepared = match bootstrap::prepare(loader) {
        Ok(prepared) => prepared,
        Err(Rejected { error, logging }) => {
            if let Err(install_err) = install(&logging) {
                eprintln!("{}: {}", install_err, error);
                return EXIT_FAILURE;
            }
            report(&error);
            return EXIT_FAILURE;
        }
    };

    if let Err(e) = install(&prepared.logging) {
        eprintln!("{}", e);
        return EXIT_FAILURE;
    }

    match dotenv_result {
        Ok(path) => info!("Loaded environment variables from {}", path.display()),
        Err(e) if !e.not_found() => warn!("Could not load .env file: {}", e),
        Err(_) => {}
    }

    info!(
        profile = %prepared.profile,
        "Starting Nestera API v{}",
        env!("CARGO_PKG_VERSION")
    );

    if cli.check_config {
        return match serde_json::to_string(prepared.config.as_dict()) {
            Ok(rendered) => {
                info!(config = %rendered, "Configuration is valid");
                EXIT_SUCCESS
            }
            Err(e) => {
                error!(error = %e, "Failed to render configuration");
                EXIT_FAILURE
            }
        };
    }

    let app = match Application::compose(prepared.config, prepared.logging).await {
        Ok(app) => app,
        Err(e) => {
            report(&e);
            return EXIT_FAILURE;
        }
    };

    let modules: Vec<_> = app.registrations().iter().map(|r| r.name).collect();
    info!(modules = ?modules, "Application starting...");

    if let Err(e) = app.run(shutdown).await {
        error!(error = %format!("{:#}", e), "Application error");
        return EXIT_FAILURE;
    }

    EXIT_SUCCESS
}

/// Emit the single failure record
fn report(err: &BootstrapError) {
    match err {
        BootstrapError::ConfigurationValidation(e) => {
            error!(field = e.field().unwrap_or("-"), error = %err, "Bootstrap failed")
        }
        BootstrapError::ModuleComposition { module, .. } => {
            error!(module = %module, error = %err, "Bootstrap failed")
        }
        BootstrapError::Logging(_) => error!(error = %err, "Bootstrap failed"),
    }
}
