//! HTTP API request handlers

use crate::app::AppState;
use crate::service::ServiceInfo;
use axum::{extract::State, http::StatusCode, response::Json};
use blockchain::{LatestLedger, NetworkDescriptor};
use serde_json::{json, Value};
use std::sync::Arc;
use types::HealthReport;

/// Service summary
pub async fn index(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    Json(state.controller.index().await)
}

/// Readiness: 503 unless every component is up
pub async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthReport>) {
    let report = state.health.check().await;

    let status = if report.is_up() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(report))
}

/// Liveness
pub async fn liveness(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    Json(state.health.liveness())
}

pub async fn network(State(state): State<Arc<AppState>>) -> Json<NetworkDescriptor> {
    Json(state.blockchain.network().clone())
}

/// Latest ledger from Soroban RPC
pub async fn latest_ledger(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LatestLedger>, (StatusCode, Json<Value>)> {
    state.blockchain.latest_ledger().await.map(Json).map_err(|e| {
        tracing::warn!(error = %e, "Failed to fetch latest ledger");
        (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": e.to_string() })),
        )
    })
}
