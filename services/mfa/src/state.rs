use sea_orm::DatabaseConnection;

use crate::infra::db::DbMfaTokenRepository;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub app_env: String,
}

impl AppState {
    pub fn mfa_token_repo(&self) -> DbMfaTokenRepository {
        DbMfaTokenRepository {
            db: self.db.clone(),
        }
    }
}
