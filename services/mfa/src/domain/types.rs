use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use subtle::ConstantTimeEq;

/// MFA token time-to-live in seconds (10 minutes).
pub const MFA_TOKEN_TTL_SECS: i64 = 600;

/// Numeric key of the user owning a token.
///
/// Deserializes from a JSON integer or a numeric string (`42` and `"42"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(id) => Ok(Self(id)),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Token value as submitted by a caller, normalised to its string form.
///
/// Integers are rendered without padding, so `7` and `"007"` are different codes.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MfaCode(String);

impl MfaCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

// Never print the secret.
impl fmt::Debug for MfaCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MfaCode(..)")
    }
}

impl From<String> for MfaCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MfaCode {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<u32> for MfaCode {
    fn from(n: u32) -> Self {
        Self(n.to_string())
    }
}

impl From<u64> for MfaCode {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl From<i64> for MfaCode {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for MfaCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Unsigned(n) => n.into(),
            Raw::Signed(n) => n.into(),
        })
    }
}

/// A stored MFA token row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MfaToken {
    pub id: i64,
    pub user_id: UserId,
    pub token: String,
    pub expiry: DateTime<Utc>,
    pub is_used: bool,
}

impl MfaToken {
    /// A token is expired once its expiry lies strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry < now
    }

    /// Constant-time comparison of the stored value against an attempt.
    pub fn matches(&self, attempt: &MfaCode) -> bool {
        self.token.as_bytes().ct_eq(attempt.as_str().as_bytes()).into()
    }
}

/// Row to insert when issuing a token. The store assigns `id`.
#[derive(Debug, Clone)]
pub struct NewMfaToken {
    pub user_id: UserId,
    pub token: MfaCode,
    pub expiry: DateTime<Utc>,
}

impl NewMfaToken {
    pub fn issued_at(user_id: UserId, token: MfaCode, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            token,
            expiry: now + Duration::seconds(MFA_TOKEN_TTL_SECS),
        }
    }
}

/// Why a verification attempt was turned down. Logged, never returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NoActiveToken,
    Expired,
    Mismatch,
    /// The row was consumed between lookup and update.
    AlreadyConsumed,
    StoreUnavailable,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoActiveToken => "no_active_token",
            Self::Expired => "expired",
            Self::Mismatch => "mismatch",
            Self::AlreadyConsumed => "already_consumed",
            Self::StoreUnavailable => "store_unavailable",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Accepted { token_id: i64 },
    Rejected(RejectReason),
}

impl Verification {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}
