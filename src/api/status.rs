//! Status Routes
//!
//! Health checks and metrics.
//!
//! Routes:
//! - GET /health - Basic health check
//! - GET /health/ready - Readiness check (database reachable)
//! - GET /metrics - Prometheus metrics endpoint

use std::time::Instant;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::{self, PoolStats};
use crate::AppState;

/// Build status routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .route("/metrics", get(prometheus_metrics))
}

// ============================================================================
// Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: DependencyCheck,
}

#[derive(Debug, Serialize)]
pub struct DependencyCheck {
    pub status: HealthStatus,
    pub latency_ms: u64,
    pub pool: PoolStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

/// GET /health/ready
///
/// 200 when the database answers, 503 otherwise.
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let started = Instant::now();
    let result = db::health_check(&state.db).await;
    let latency_ms = started.elapsed().as_millis() as u64;

    let (status, message) = match result {
        Ok(()) => (HealthStatus::Healthy, None),
        Err(e) => {
            tracing::warn!(error = %e, "Database readiness check failed");
            (HealthStatus::Unhealthy, Some(e.to_string()))
        }
    };
    let ready = status == HealthStatus::Healthy;

    let body = ReadinessResponse {
        ready,
        database: DependencyCheck {
            status,
            latency_ms,
            pool: db::get_pool_stats(&state.db),
            message,
        },
    };

    let code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(body))
}

/// GET /metrics
async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    if let Ok(unread) = db::count_unread_messages(&state.db).await {
        crate::metrics::unread_messages(unread);
    }

    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        ),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            "metrics recorder not installed\n".to_string(),
        ),
    }
}
