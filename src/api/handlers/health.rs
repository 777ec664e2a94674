//! Health check endpoint handlers.
//!
//! The database check talks to the connection pool directly. With in-memory
//! storage there is nothing to reach, so it reports healthy.

use std::collections::HashMap;
use std::time::Instant;

use axum::{Router, extract::State, http::StatusCode, response::Json, routing::get};

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::health::{ComponentHealth, HealthResponse, HealthStatus};
use crate::db::AsyncDbPool;
use crate::state::AppState;

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Full check including the database
/// - `GET /health/live` - Liveness probe
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness_check))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database is unreachable", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_check = check_database(state.db_pool.as_ref()).await;
    let status = db_check.status;

    let mut checks = HashMap::new();
    checks.insert("database".to_string(), db_check);

    let response = HealthResponse {
        status,
        version: crate::pkg_version().to_string(),
        timestamp: jiff::Timestamp::now().to_string(),
        checks,
    };

    let code = match status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (code, Json(response))
}

/// Liveness probe. Does not touch dependencies.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = HEALTH_TAG
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

async fn check_database(pool: Option<&AsyncDbPool>) -> ComponentHealth {
    let Some(pool) = pool else {
        return ComponentHealth {
            status: HealthStatus::Healthy,
            message: Some("In-memory storage".to_string()),
            response_time_ms: None,
        };
    };

    let start_time = Instant::now();
    let elapsed = || Some(start_time.elapsed().as_millis() as u64);

    match pool.get().await {
        Ok(mut conn) => {
            use diesel_async::RunQueryDsl;

            match diesel::sql_query("SELECT 1").execute(&mut conn).await {
                Ok(_) => ComponentHealth {
                    status: HealthStatus::Healthy,
                    message: Some("Connected".to_string()),
                    response_time_ms: elapsed(),
                },
                Err(e) => {
                    tracing::warn!(error = %e, "Health check query failed");
                    ComponentHealth {
                        status: HealthStatus::Unhealthy,
                        message: Some(format!("Query failed: {}", e)),
                        response_time_ms: elapsed(),
                    }
                }
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not get a connection");
            ComponentHealth {
                status: HealthStatus::Unhealthy,
                message: Some(format!("Connection failed: {}", e)),
                response_time_ms: elapsed(),
            }
        }
    }
}
