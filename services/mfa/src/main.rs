use sea_orm::Database;
use tracing::info;

use mfa_core::config::Config;
use mfa_core::tracing::init_tracing;
use mfa_service::config::MfaConfig;
use mfa_service::router::build_router;
use mfa_service::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = MfaConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        app_env: config.app_env,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.mfa_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("mfa service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
