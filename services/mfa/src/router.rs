use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use mfa_core::health::healthz;
use mfa_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    health::{health, readyz},
    mfa_token::{issue_mfa_token, verify_mfa_token},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/health", get(health))
        .route("/api/health", get(health))
        // MFA token
        .route("/api/mfa/token", post(issue_mfa_token))
        .route("/api/mfa/verify", post(verify_mfa_token))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
