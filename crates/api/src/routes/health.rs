//! `GET /health`: 200 when the review store is reachable and seeded with its
//! schema, 503 otherwise.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::{AppState, StoreStatus};

#[derive(Debug, Serialize)]
struct HealthReport {
    status: &'static str,
    postgres: bool,
    schema: bool,
}

impl From<StoreStatus> for HealthReport {
    fn from(store: StoreStatus) -> Self {
        let (postgres, schema) = match store {
            StoreStatus::Ready => (true, true),
            StoreStatus::MissingSchema => (true, false),
            StoreStatus::Unreachable => (false, false),
        };
        let status = if schema { "healthy" } else { "unhealthy" };

        Self {
            status,
            postgres,
            schema,
        }
    }
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = HealthReport::from(state.store_status().await);
    let code = if report.schema {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(report))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::send;

    #[test]
    fn missing_schema_is_unhealthy() {
        let report = HealthReport::from(StoreStatus::MissingSchema);
        assert_eq!(report.status, "unhealthy");
        assert!(report.postgres);
        assert!(!report.schema);
    }

    #[tokio::test]
    async fn unreachable_store_is_503() {
        let (status, body) = send("GET", "/health", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["postgres"], false);
        assert_eq!(body["schema"], false);
    }
}
