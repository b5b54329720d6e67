pub mod health;
pub mod mfa_token;
