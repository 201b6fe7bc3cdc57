//! HTTP API server implementation

use crate::api::routes;
use crate::app::AppState;
use anyhow::{Context, Result};
use axum::{http::Method, Router};
use std::{future::Future, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

/// HTTP API server
pub struct ApiServer {
    app: Router,
    host: String,
    port: u16,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(state: Arc<AppState>) -> Self {
        let settings = &state.server;

        // No allowed origins means no CORS headers are sent
        let cors = if settings.cors_enabled {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers(Any)
        } else {
            CorsLayer::new()
        };

        let host = settings.host.clone();
        let port = settings.port;

        let app = Router::new()
            .merge(routes::create_routes())
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(TimeoutLayer::new(Duration::from_secs(
                settings.request_timeout_seconds,
            )))
            .layer(cors)
            .with_state(state);

        info!("API server configured for {}:{}", host, port);

        Self { app, host, port }
    }

    #[cfg(test)]
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Run the API server until `shutdown` completes
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind((self.host.as_str(), self.port))
            .await
            .with_context(|| format!("Failed to bind to {}:{}", self.host, self.port))?;

        info!("API server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown)
            .await
            .context("API server error")?;

        Ok(())
    }
}
