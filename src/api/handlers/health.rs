use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use utoipa::ToSchema;

/// Basic health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Readiness probe response
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub database: String,
    pub response_time_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /health
/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Map a database error to a message that does not leak connection details
fn sanitize_db_error(error: &sqlx::Error) -> &'static str {
    match error {
        sqlx::Error::Configuration(_) => "Database configuration error",
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) => "Database connection error",
        sqlx::Error::PoolTimedOut => "Database pool timeout",
        sqlx::Error::PoolClosed => "Database pool closed",
        _ => "Database error",
    }
}

/// GET /health/ready
/// Readiness probe; checks the database when one is configured
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Service is not ready", body = ReadinessResponse)
    )
)]
pub async fn readiness_handler(
    State(pool): State<Option<Arc<PgPool>>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let start = Instant::now();

    let Some(pool) = pool else {
        return (
            StatusCode::OK,
            Json(ReadinessResponse {
                status: "ready".to_string(),
                database: "in-memory".to_string(),
                response_time_ms: start.elapsed().as_millis(),
                error: None,
            }),
        );
    };

    let db_check = tokio::time::timeout(
        Duration::from_secs(2),
        sqlx::query("SELECT 1").fetch_one(pool.as_ref()),
    )
    .await;

    let (status, database, error) = match db_check {
        Ok(Ok(_)) => (StatusCode::OK, "connected", None),
        Ok(Err(e)) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "disconnected",
            Some(sanitize_db_error(&e).to_string()),
        ),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "timeout",
            Some("Database query timed out after 2 seconds".to_string()),
        ),
    };

    (
        status,
        Json(ReadinessResponse {
            status: if status.is_success() { "ready" } else { "not_ready" }.to_string(),
            database: database.to_string(),
            response_time_ms: start.elapsed().as_millis(),
            error,
        }),
    )
}
