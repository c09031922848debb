//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::warn;

use crate::{error::ApiError, AppState};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: None,
        latency_ms: None,
    })
}

/// Readiness check (includes the invoice store)
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, ApiError> {
    let health = state.ledger.health().await;

    if !health.is_operational() {
        warn!(
            storage = %health.adapter_id,
            reason = health.message.as_deref().unwrap_or("unknown"),
            "Readiness check failed"
        );
        return Err(ApiError::ServiceUnavailable(format!(
            "{} store unavailable",
            health.adapter_id
        )));
    }

    Ok(Json(HealthResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: Some(health.adapter_id),
        latency_ms: Some(health.latency_ms),
    }))
}
