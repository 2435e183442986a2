use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;

use crate::state::AppState;

/// Readiness report: the service is `ok` only while player storage answers.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    status: &'static str,
    database: &'static str,
    checked_at: String,
}

// GET /health - Player storage reachability
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let checked_at = chrono::Utc::now().to_rfc3339();

    match state.players.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthStatus { status: "ok", database: "up", checked_at }),
        ),
        Err(err) => {
            tracing::warn!("Health check failed: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus { status: "degraded", database: "down", checked_at }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::error::ApiError;
    use crate::messages::BundleMessageSource;
    use crate::service::MockPlayerService;

    async fn check(service: MockPlayerService) -> (StatusCode, Value) {
        let app = crate::app(AppState::new(
            Arc::new(service),
            Arc::new(BundleMessageSource::with_defaults()),
        ));
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn reachable_storage_is_ok() {
        let mut service = MockPlayerService::new();
        service.expect_ping().times(1).returning(|| Ok(()));

        let (status, body) = check(service).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "up");
        assert!(body["checked_at"].is_string());
    }

    #[tokio::test]
    async fn unreachable_storage_is_degraded() {
        let mut service = MockPlayerService::new();
        service
            .expect_ping()
            .returning(|| Err(ApiError::DatabaseError(sqlx::Error::PoolClosed)));

        let (status, body) = check(service).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["database"], "down");
    }
}
