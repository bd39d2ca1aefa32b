//! Health check handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service name
    pub service: String,

    /// Version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Readiness check response with dependency status
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Overall readiness status
    pub ready: bool,

    /// Service name
    pub service: String,

    /// Dependency statuses
    pub dependencies: HashMap<String, DependencyStatus>,
}

/// Individual dependency status
#[derive(Debug, Serialize, Deserialize)]
pub struct DependencyStatus {
    /// Dependency is healthy
    pub healthy: bool,

    /// Optional message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `/health` and `/ready`, already bound to their state
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(readiness))
        .with_state(state)
}

/// Liveness probe
///
/// Always returns 200 OK if the service is running.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: state.config().service.name.clone(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    };

    (StatusCode::OK, Json(response))
}

/// Readiness probe
///
/// Returns 503 Service Unavailable if a configured database does not answer.
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    #[cfg_attr(not(feature = "database"), allow(unused_mut))]
    let mut dependencies = HashMap::new();
    #[cfg_attr(not(feature = "database"), allow(unused_mut))]
    let mut all_ready = true;

    #[cfg(feature = "database")]
    if state.config().database.is_some() {
        let status = match state.db() {
            Some(pool) => match sqlx::query("SELECT 1").fetch_one(pool).await {
                Ok(_) => DependencyStatus {
                    healthy: true,
                    message: Some("Connected".to_string()),
                },
                Err(e) => {
                    tracing::error!("Database health check failed: {}", e);
                    DependencyStatus {
                        healthy: false,
                        message: Some("Connection failed".to_string()),
                    }
                }
            },
            None => DependencyStatus {
                healthy: false,
                message: Some("Not connected".to_string()),
            },
        };
        all_ready &= status.healthy;
        dependencies.insert("database".to_string(), status);
    }

    let status = if all_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = ReadinessResponse {
        ready: all_ready,
        service: state.config().service.name.clone(),
        dependencies,
    };

    (status, Json(response))
}
