use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use mfa_service::domain::repository::MfaTokenRepository;
use mfa_service::domain::types::{MfaToken, NewMfaToken, UserId};
use mfa_service::error::MfaServiceError;
use mfa_service::usecase::issue::IssueMfaTokenUseCase;
use mfa_service::usecase::verify::VerifyMfaTokenUseCase;

// ── InMemoryMfaTokenRepo ─────────────────────────────────────────────────────

/// In-memory token store. Clones share the same rows, so an issue use case and a
/// verify use case built from clones see each other's writes.
#[derive(Clone, Default)]
pub struct InMemoryMfaTokenRepo {
    pub rows: Arc<Mutex<Vec<MfaToken>>>,
    pub fail_insert: bool,
    pub fail_find: bool,
    pub fail_consume: bool,
    /// Mark the row used right before the conditional update runs, as a
    /// concurrent verifier would.
    pub consume_race: bool,
}

impl InMemoryMfaTokenRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<MfaToken>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
            ..Self::default()
        }
    }

    /// Snapshot of every stored row, oldest first.
    pub fn rows(&self) -> Vec<MfaToken> {
        self.rows.lock().unwrap().clone()
    }

    pub fn row(&self, id: i64) -> MfaToken {
        self.rows()
            .into_iter()
            .find(|r| r.id == id)
            .expect("row exists")
    }
}

impl MfaTokenRepository for InMemoryMfaTokenRepo {
    async fn insert(&self, token: &NewMfaToken) -> Result<MfaToken, MfaServiceError> {
        if self.fail_insert {
            return Err(anyhow::anyhow!("insert rejected").into());
        }
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let row = MfaToken {
            id,
            user_id: token.user_id,
            token: token.token.as_str().to_owned(),
            expiry: token.expiry,
            is_used: false,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn find_active(&self, user_id: UserId) -> Result<Option<MfaToken>, MfaServiceError> {
        if self.fail_find {
            return Err(anyhow::anyhow!("select timed out").into());
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id && !r.is_used)
            .max_by_key(|r| r.id)
            .cloned())
    }

    async fn consume(&self, id: i64) -> Result<bool, MfaServiceError> {
        if self.fail_consume {
            return Err(anyhow::anyhow!("update timed out").into());
        }
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };
        if self.consume_race {
            row.is_used = true;
        }
        if row.is_used {
            return Ok(false);
        }
        row.is_used = true;
        Ok(true)
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn issuer(repo: &InMemoryMfaTokenRepo) -> IssueMfaTokenUseCase<InMemoryMfaTokenRepo> {
    IssueMfaTokenUseCase {
        tokens: repo.clone(),
    }
}

pub fn verifier(repo: &InMemoryMfaTokenRepo) -> VerifyMfaTokenUseCase<InMemoryMfaTokenRepo> {
    VerifyMfaTokenUseCase {
        tokens: repo.clone(),
    }
}

/// Fixed issue instant so expiry arithmetic in tests is exact.
pub fn issued_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
}

pub fn unused_row(id: i64, user_id: i64, token: &str, expiry: DateTime<Utc>) -> MfaToken {
    MfaToken {
        id,
        user_id: UserId(user_id),
        token: token.to_owned(),
        expiry,
        is_used: false,
    }
}
