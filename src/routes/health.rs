use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::AppState;

/// GET /health — 503 while the backend is unreachable. The display keeps
/// showing the last good snapshot either way.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let stats = state.display.borrow().stats.clone();
    match stats.last_poll_ok {
        Some(false) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "last_poll_ok": false,
                "polls": stats.polls,
                "error": stats.last_error,
            })),
        ),
        Some(true) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "last_poll_ok": true, "polls": stats.polls })),
        ),
        None => (
            StatusCode::OK,
            Json(json!({ "status": "starting", "last_poll_ok": null, "polls": 0 })),
        ),
    }
}
