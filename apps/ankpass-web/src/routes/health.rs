//! Liveness endpoint.

use axum::Json;
use serde_json::{json, Value};

/// `GET /healthz` — fixed "ok" response with an empty body.
pub async fn healthz() -> Json<Value> {
    Json(json!({}))
}
