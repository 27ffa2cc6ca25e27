use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use sqlx::SqlitePool;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: String,
    pub version: &'static str,
    pub dependencies: Dependencies,
}

#[derive(Debug, Serialize)]
pub struct Dependencies {
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub status: HealthStatus,
    pub response_time_ms: u64,
}

/// `GET /health`: 200 when the database answers, 503 otherwise.
/// Unauthenticated, so failures are logged rather than returned.
pub async fn health_check(State(pool): State<SqlitePool>) -> (StatusCode, Json<HealthResponse>) {
    let database = ping_database(&pool).await;

    let status_code = match database.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    let response = HealthResponse {
        status: database.status,
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
        dependencies: Dependencies { database },
    };

    (status_code, Json(response))
}

async fn ping_database(pool: &SqlitePool) -> DatabaseHealth {
    let start = Instant::now();

    let status = match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => HealthStatus::Healthy,
        Err(e) => {
            tracing::error!(error = %e, "Health check database ping failed");
            HealthStatus::Unhealthy
        }
    };

    DatabaseHealth {
        status,
        response_time_ms: start.elapsed().as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[tokio::test]
    async fn test_closed_pool_reports_unhealthy_without_details() {
        let pool = db::create_pool("sqlite::memory:", 1).await.unwrap();
        pool.close().await;

        let (status, Json(response)) = health_check(State(pool)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.status, HealthStatus::Unhealthy);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(
            json["dependencies"]["database"],
            serde_json::json!({
                "status": "unhealthy",
                "response_time_ms": response.dependencies.database.response_time_ms
            })
        );
        assert!(!json.to_string().contains("error"));
    }
}
