use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// MFA service error variants.
#[derive(Debug, thiserror::Error)]
pub enum MfaServiceError {
    /// Covers every failed verification; the cause is only logged.
    #[error("invalid mfa token")]
    InvalidMfaToken,
    #[error("store error")]
    Store(#[from] anyhow::Error),
}

impl MfaServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidMfaToken => "INVALID_MFA_TOKEN",
            Self::Store(_) => "STORE",
        }
    }
}

impl IntoResponse for MfaServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidMfaToken => StatusCode::UNAUTHORIZED,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // TraceLayer already records method/uri/status; only store failures need
        // the anyhow chain logged.
        if let Self::Store(ref e) = self {
            tracing::error!(error = ?e, kind = "STORE", "store error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
