use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AxumAppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    store: StoreHealth,
}

#[derive(Serialize)]
pub struct StoreHealth {
    backend: String,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint
///
/// Pings the member store (bounded to 5 seconds).
///
/// Returns 200 OK if the store answers, 503 Service Unavailable otherwise.
pub async fn health_handler(
    Extension(state): Extension<AxumAppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let store = &state.deps.member_store;

    let store_health = match tokio::time::timeout(
        std::time::Duration::from_secs(5),
        store.ping(),
    )
    .await
    {
        Ok(Ok(())) => StoreHealth {
            backend: store.backend().to_string(),
            status: "ok".to_string(),
            error: None,
        },
        Ok(Err(e)) => StoreHealth {
            backend: store.backend().to_string(),
            status: "error".to_string(),
            error: Some(format!("Ping failed: {}", e)),
        },
        Err(_) => StoreHealth {
            backend: store.backend().to_string(),
            status: "error".to_string(),
            error: Some("Ping timeout (>5s)".to_string()),
        },
    };

    let is_healthy = store_health.status == "ok";

    let (status_code, overall_status) = if is_healthy {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        status_code,
        Json(HealthResponse {
            status: overall_status.to_string(),
            store: store_health,
        }),
    )
}
