//! Health check endpoints

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::ApiError, AppState};

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    pub message: String,
    /// Version of the service
    pub version: String,
    /// Configured database, reported by the readiness check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Configured pool size, reported by the readiness check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Banner at the server root
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Library API is working!".to_string(),
        timestamp: Utc::now(),
    })
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Server is running perfectly".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: None,
        max_connections: None,
    })
}

/// Readiness check endpoint (checks database connectivity)
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = HealthResponse),
        (status = 500, description = "Database unreachable")
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    state.services.catalog.ping().await?;

    let database = &state.config.database;
    tracing::debug!(
        database = %database.name,
        max_connections = database.max_connections,
        "Readiness check passed"
    );

    Ok(Json(HealthResponse {
        status: "ready".to_string(),
        message: "Database reachable".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: Some(database.name.clone()),
        max_connections: Some(database.max_connections),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::{
        api, config::AppConfig, error::AppError, repository::MockBookStore, services::Services,
        AppState,
    };

    fn state(store: MockBookStore) -> AppState {
        AppState {
            config: Arc::new(AppConfig::default()),
            services: Arc::new(Services::with_store(Arc::new(store))),
        }
    }

    #[tokio::test]
    async fn health_does_not_touch_storage() {
        let app = api::router(state(MockBookStore::new()));
        let response = app
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "OK");
        assert_eq!(body["message"], "Server is running perfectly");
        assert!(body.get("database").is_none());
    }

    #[tokio::test]
    async fn readiness_reports_configured_database() {
        let mut store = MockBookStore::new();
        store.expect_ping().times(1).returning(|| Ok(()));
        let app = api::router(state(store));

        let response = app
            .oneshot(Request::get("/api/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ready");
        assert_eq!(body["database"], "library_db");
        assert_eq!(body["max_connections"], 10);
    }

    #[tokio::test]
    async fn readiness_fails_when_storage_is_down() {
        let mut store = MockBookStore::new();
        store
            .expect_ping()
            .returning(|| Err(AppError::Database(sqlx::Error::PoolTimedOut)));
        let app = api::router(state(store));

        let response = app
            .oneshot(Request::get("/api/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn root_banner() {
        let app = api::router(state(MockBookStore::new()));
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Library API is working!");
    }
}
