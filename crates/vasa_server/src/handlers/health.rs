//! GET /health - store round-trip check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let now = state
        .run(|conn| {
            let now: String = conn.query_row(
                "SELECT strftime('%Y-%m-%dT%H:%M:%fZ', 'now');",
                [],
                |row| row.get(0),
            )?;
            Ok(now)
        })
        .await;

    match now {
        Ok(now) => (StatusCode::OK, Json(json!({ "ok": true, "now": now }))),
        Err(err) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "ok": false, "error": err.to_string() })),
        ),
    }
}
