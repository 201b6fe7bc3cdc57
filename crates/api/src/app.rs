//! Application composition and lifecycle

use crate::{api::ApiServer, controller::AppController, service::AppService};
use anyhow::Result;
use blockchain::BlockchainModule;
use config::{Configuration, LoggingPipelineConfig, ModuleContext, ServerSettings};
use health::HealthModule;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};
use types::BootstrapError;

/// Something a module needs before it can initialize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Dependency {
    Configuration,
    Logging,
    Module(&'static str),
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dependency::Configuration => f.write_str("configuration"),
            Dependency::Logging => f.write_str("logging"),
            Dependency::Module(name) => write!(f, "module '{}'", name),
        }
    }
}

/// A module in the fixed composition sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleRegistration {
    pub name: &'static str,
    pub order: usize,
    pub depends_on: Vec<Dependency>,
}

/// Tracks what is ready while modules are brought up one by one
#[derive(Debug, Default)]
struct Composer {
    ready: Vec<Dependency>,
    registrations: Vec<ModuleRegistration>,
}

impl Composer {
    fn mark_ready(&mut self, dependency: Dependency) {
        self.ready.push(dependency);
    }

    /// Reserve the next slot for `name` once all of its dependencies are ready
    fn register(
        &self,
        name: &'static str,
        depends_on: Vec<Dependency>,
    ) -> Result<ModuleRegistration, BootstrapError> {
        if let Some(missing) = depends_on.iter().find(|d| !self.ready.contains(d)) {
            return Err(BootstrapError::module(
                name,
                format!("dependency {} is not ready", missing),
            ));
        }

        Ok(ModuleRegistration {
            name,
            order: self.registrations.len() + 1,
            depends_on,
        })
    }

    fn complete(&mut self, registration: ModuleRegistration) {
        info!(module = registration.name, order = registration.order, "Module ready");
        self.ready.push(Dependency::Module(registration.name));
        self.registrations.push(registration);
    }
}

/// State shared by the HTTP handlers
#[derive(Debug)]
pub struct AppState {
    pub server: ServerSettings,
    pub health: HealthModule,
    pub blockchain: BlockchainModule,
    pub controller: AppController,
}

/// Fully composed application
pub struct Application {
    state: Arc<AppState>,
    registrations: Vec<ModuleRegistration>,
    api_server: ApiServer,
}

impl Application {
    /// Bring up every module in order: health, blockchain, then the app
    /// controller. The first failure aborts composition.
    pub async fn compose(
        config: Configuration,
        logging: LoggingPipelineConfig,
    ) -> std::result::Result<Self, BootstrapError> {
        let mut composer = Composer::default();
        composer.mark_ready(Dependency::Configuration);

        let ctx = ModuleContext::new(config, Arc::new(logging));
        composer.mark_ready(Dependency::Logging);
        info!(profile = %ctx.profile(), "Composing application");

        let registration = composer.register(
            HealthModule::NAME,
            vec![Dependency::Configuration, Dependency::Logging],
        )?;
        let health = HealthModule::init(&ctx).map_err(|e| BootstrapError::module(HealthModule::NAME, e))?;
        composer.complete(registration);

        let registration = composer.register(
            BlockchainModule::NAME,
            vec![Dependency::Configuration, Dependency::Logging],
        )?;
        let blockchain = BlockchainModule::init(&ctx)
            .await
            .map_err(|e| BootstrapError::module(BlockchainModule::NAME, e))?;
        let health = health.with_indicator(blockchain.health_indicator());
        composer.complete(registration);

        let registration = composer.register(
            AppController::NAME,
            vec![
                Dependency::Configuration,
                Dependency::Module(HealthModule::NAME),
                Dependency::Module(BlockchainModule::NAME),
            ],
        )?;
        let server: ServerSettings = ctx
            .settings()
            .map_err(|e| BootstrapError::module(AppController::NAME, e))?;
        let service = AppService::new(&ctx, health.clone(), &blockchain)
            .map_err(|e| BootstrapError::module(AppController::NAME, e))?;
        let controller = AppController::new(service);
        composer.complete(registration);

        let state = Arc::new(AppState {
            server,
            health,
            blockchain,
            controller,
        });
        let api_server = ApiServer::new(state.clone());

        info!(modules = composer.registrations.len(), "Application composed");

        Ok(Self {
            state,
            registrations: composer.registrations,
            api_server,
        })
    }

    /// Modules in the order they were initialized
    pub fn registrations(&self) -> &[ModuleRegistration] {
        &self.registrations
    }

    #[cfg(test)]
    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    #[cfg(test)]
    pub fn router(&self) -> axum::Router {
        self.api_server.router()
    }

    /// Serve HTTP until `shutdown` completes
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(
            network = %self.state.blockchain.network().network,
            contract_id = %self.state.blockchain.contract_id(),
            "Serving Nestera API"
        );
        self.api_server.run(shutdown).await?;
        info!("Application shutdown complete");
        Ok(())
    }
}

/// Resolves on Ctrl+C
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{compose, config_for};
    use super::*;
    use crate::logging::{build_subscriber, test_support::CapturedLogs};
    use config::EnvironmentProfile;

    /// RPC endpoint that refuses connections; nothing is called during compose
    const OFFLINE_RPC: &str = "http://127.0.0.1:9";

    fn capture() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
        let logs = CapturedLogs::default();
        let pipeline = LoggingPipelineConfig::select(&EnvironmentProfile::Production);
        let guard = tracing::subscriber::set_default(build_subscriber(&pipeline, logs.clone()));
        (logs, guard)
    }

    fn ready_modules(logs: &CapturedLogs) -> Vec<String> {
        logs.lines()
            .iter()
            .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
            .filter(|record| record["fields"]["message"] == "Module ready")
            .filter_map(|record| record["fields"]["module"].as_str().map(str::to_string))
            .collect()
    }

    #[tokio::test]
    async fn test_modules_compose_in_fixed_order() {
        let (logs, _guard) = capture();
        let app = compose(OFFLINE_RPC).await;

        let names: Vec<_> = app.registrations().iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["health", "blockchain", "app"]);
        let orders: Vec<_> = app.registrations().iter().map(|r| r.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);

        assert_eq!(ready_modules(&logs), vec!["health", "blockchain", "app"]);
        assert_eq!(app.state().health.indicator_names(), vec!["soroban-rpc"]);
    }

    #[tokio::test]
    async fn test_app_depends_on_feature_modules() {
        let app = compose(OFFLINE_RPC).await;
        let app_registration = &app.registrations()[2];
        assert!(app_registration
            .depends_on
            .contains(&Dependency::Module(HealthModule::NAME)));
        assert!(app_registration
            .depends_on
            .contains(&Dependency::Module(BlockchainModule::NAME)));
    }

    #[tokio::test]
    async fn test_blockchain_failure_aborts_composition() {
        let (logs, _guard) = capture();
        let mut config = config_for(OFFLINE_RPC, &[]).into_dict();
        config.insert("contract_id".to_string(), "not-a-contract".into());

        let result = Application::compose(
            Configuration::from_dict(config),
            LoggingPipelineConfig::select(&EnvironmentProfile::Test),
        )
        .await;

        match result {
            Err(BootstrapError::ModuleComposition { module, .. }) => assert_eq!(module, "blockchain"),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("composition should fail"),
        }
        assert_eq!(ready_modules(&logs), vec!["health"]);
    }

    #[test]
    fn test_unready_dependency_is_rejected() {
        let mut composer = Composer::default();
        composer.mark_ready(Dependency::Configuration);

        let err = composer
            .register("health", vec![Dependency::Configuration, Dependency::Logging])
            .unwrap_err();
        assert!(err.to_string().contains("dependency logging is not ready"));

        composer.mark_ready(Dependency::Logging);
        let registration = composer
            .register("health", vec![Dependency::Configuration, Dependency::Logging])
            .unwrap();
        assert_eq!(registration.order, 1);
    }
}
