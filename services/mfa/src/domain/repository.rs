#![allow(async_fn_in_trait)]

use crate::domain::types::{MfaToken, NewMfaToken, UserId};
use crate::error::MfaServiceError;

/// Store for one-time MFA tokens.
pub trait MfaTokenRepository: Send + Sync {
    /// Insert a new unused token and return the stored row (with its assigned id).
    async fn insert(&self, token: &NewMfaToken) -> Result<MfaToken, MfaServiceError>;

    /// Most recent (highest id) unused token for a user, expired or not.
    async fn find_active(&self, user_id: UserId) -> Result<Option<MfaToken>, MfaServiceError>;

    /// Flip `is_used` to true if it is still false.
    ///
    /// Returns `true` only when this call performed the transition.
    async fn consume(&self, id: i64) -> Result<bool, MfaServiceError>;
}
