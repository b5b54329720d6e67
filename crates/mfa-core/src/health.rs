use axum::http::StatusCode;
use chrono::Utc;
use serde::Serialize;

/// Handler for `GET /healthz` — liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Body returned by the JSON health endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub ok: bool,
    /// Milliseconds since the unix epoch at the time of the check.
    pub ts: i64,
    pub env: String,
}

impl HealthReport {
    pub fn now(env: &str) -> Self {
        Self {
            ok: true,
            ts: Utc::now().timestamp_millis(),
            env: env.to_owned(),
        }
    }
}
