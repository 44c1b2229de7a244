//! Liveness endpoints.

use axum::Json;
use serde_json::{Value, json};

/// GET / -- service status.
pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "online",
        "message": "Parley gateway is running",
    }))
}

/// GET /health -- health probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
