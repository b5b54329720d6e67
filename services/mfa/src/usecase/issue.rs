use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::repository::MfaTokenRepository;
use crate::domain::types::{MfaCode, MfaToken, NewMfaToken, UserId};
use crate::error::MfaServiceError;

pub struct IssueMfaTokenInput {
    pub user_id: UserId,
    pub token: MfaCode,
}

/// Stores a fresh token for a user. Earlier unused tokens stay in the store but
/// are superseded: verification only ever looks at the newest one.
pub struct IssueMfaTokenUseCase<R>
where
    R: MfaTokenRepository,
{
    pub tokens: R,
}

impl<R> IssueMfaTokenUseCase<R>
where
    R: MfaTokenRepository,
{
    pub async fn execute(&self, input: IssueMfaTokenInput) -> Result<MfaToken, MfaServiceError> {
        self.execute_at(input, Utc::now()).await
    }

    pub async fn execute_at(
        &self,
        input: IssueMfaTokenInput,
        now: DateTime<Utc>,
    ) -> Result<MfaToken, MfaServiceError> {
        let new = NewMfaToken::issued_at(input.user_id, input.token, now);
        let stored = self.tokens.insert(&new).await?;

        info!(
            user_id = %stored.user_id,
            token_id = stored.id,
            expiry = %stored.expiry,
            "mfa token issued"
        );
        Ok(stored)
    }
}
