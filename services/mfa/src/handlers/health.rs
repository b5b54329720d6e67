use axum::{Json, extract::State, http::StatusCode};

use mfa_core::health::HealthReport;

use crate::state::AppState;

/// Handler for `GET /health` and `GET /api/health`.
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport::now(&state.app_env))
}

/// Handler for `GET /readyz` — ready once the database answers a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "database ping failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
