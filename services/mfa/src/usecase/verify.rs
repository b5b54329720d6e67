use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::domain::repository::MfaTokenRepository;
use crate::domain::types::{MfaCode, RejectReason, UserId, Verification};

pub struct VerifyMfaTokenInput {
    pub user_id: UserId,
    pub token: MfaCode,
}

/// Checks an attempt against the user's active token and consumes it on success.
///
/// Store failures are folded into a rejection: a token is never reported valid
/// unless this call is the one that marked it used.
pub struct VerifyMfaTokenUseCase<R>
where
    R: MfaTokenRepository,
{
    pub tokens: R,
}

impl<R> VerifyMfaTokenUseCase<R>
where
    R: MfaTokenRepository,
{
    pub async fn execute(&self, input: VerifyMfaTokenInput) -> Verification {
        self.execute_at(input, Utc::now()).await
    }

    pub async fn execute_at(&self, input: VerifyMfaTokenInput, now: DateTime<Utc>) -> Verification {
        let outcome = self.check(&input, now).await;
        match outcome {
            Verification::Accepted { token_id } => {
                info!(user_id = %input.user_id, token_id, "mfa token verified");
            }
            Verification::Rejected(reason) => {
                warn!(user_id = %input.user_id, %reason, "mfa token rejected");
            }
        }
        outcome
    }

    async fn check(&self, input: &VerifyMfaTokenInput, now: DateTime<Utc>) -> Verification {
        // 1. Newest unused row only; older unused rows are superseded.
        let active = match self.tokens.find_active(input.user_id).await {
            Ok(Some(token)) => token,
            Ok(None) => return Verification::Rejected(RejectReason::NoActiveToken),
            Err(e) => {
                error!(error = ?e, user_id = %input.user_id, "lookup of active mfa token failed");
                return Verification::Rejected(RejectReason::StoreUnavailable);
            }
        };

        // 2. Expired rows are left unused; they simply stop matching.
        if active.is_expired_at(now) {
            return Verification::Rejected(RejectReason::Expired);
        }

        // 3. A wrong guess does not burn the token.
        if !active.matches(&input.token) {
            return Verification::Rejected(RejectReason::Mismatch);
        }

        // 4. Compare-and-swap on is_used; only the winner is accepted.
        match self.tokens.consume(active.id).await {
            Ok(true) => Verification::Accepted {
                token_id: active.id,
            },
            Ok(false) => Verification::Rejected(RejectReason::AlreadyConsumed),
            Err(e) => {
                error!(error = ?e, token_id = active.id, "consuming mfa token failed");
                Verification::Rejected(RejectReason::StoreUnavailable)
            }
        }
    }
}
