use serde::Deserialize;

use mfa_core::config::Config;

/// MFA service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct MfaConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port to listen on (default 10000). Env var: `MFA_PORT`.
    #[serde(default = "default_port")]
    pub mfa_port: u16,
    /// Deployment name reported by the health endpoints. Env var: `APP_ENV`.
    #[serde(default = "default_env")]
    pub app_env: String,
}

impl Config for MfaConfig {}

fn default_port() -> u16 {
    10000
}

fn default_env() -> String {
    "production".to_owned()
}
