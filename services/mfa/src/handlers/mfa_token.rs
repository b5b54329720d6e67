use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mfa_core::serde::to_rfc3339_ms;

use crate::domain::types::{MfaCode, UserId};
use crate::error::MfaServiceError;
use crate::state::AppState;
use crate::usecase::issue::{IssueMfaTokenInput, IssueMfaTokenUseCase};
use crate::usecase::verify::{VerifyMfaTokenInput, VerifyMfaTokenUseCase};

// ── POST /api/mfa/token ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IssueMfaTokenRequest {
    pub user_id: UserId,
    pub token: MfaCode,
}

#[derive(Serialize)]
pub struct IssueMfaTokenResponse {
    pub user_id: UserId,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub expiry: DateTime<Utc>,
}

pub async fn issue_mfa_token(
    State(state): State<AppState>,
    Json(body): Json<IssueMfaTokenRequest>,
) -> Result<(StatusCode, Json<IssueMfaTokenResponse>), MfaServiceError> {
    let usecase = IssueMfaTokenUseCase {
        tokens: state.mfa_token_repo(),
    };
    let stored = usecase
        .execute(IssueMfaTokenInput {
            user_id: body.user_id,
            token: body.token,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(IssueMfaTokenResponse {
            user_id: stored.user_id,
            expiry: stored.expiry,
        }),
    ))
}

// ── POST /api/mfa/verify ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyMfaTokenRequest {
    pub user_id: UserId,
    pub token: MfaCode,
}

#[derive(Serialize)]
pub struct VerifyMfaTokenResponse {
    pub verified: bool,
}

pub async fn verify_mfa_token(
    State(state): State<AppState>,
    Json(body): Json<VerifyMfaTokenRequest>,
) -> Result<Json<VerifyMfaTokenResponse>, MfaServiceError> {
    let usecase = VerifyMfaTokenUseCase {
        tokens: state.mfa_token_repo(),
    };
    let outcome = usecase
        .execute(VerifyMfaTokenInput {
            user_id: body.user_id,
            token: body.token,
        })
        .await;
    if !outcome.is_accepted() {
        return Err(MfaServiceError::InvalidMfaToken);
    }
    Ok(Json(VerifyMfaTokenResponse { verified: true }))
}
