use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::infra::app_state::AppState;

pub async fn ping_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Reports the catalog store as well as the process.
pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<Value>) {
    match state.catalog.count().await {
        Ok(entries) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "catalog": { "status": "ok", "entries": entries },
                "subscribers": state.fanout.subscriber_count(),
                "version": env!("CARGO_PKG_VERSION"),
            })),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "health check: catalog store unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "catalog": { "status": "unavailable" },
                    "subscribers": state.fanout.subscriber_count(),
                    "version": env!("CARGO_PKG_VERSION"),
                })),
            )
        }
    }
}
