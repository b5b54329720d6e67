//! Shared plumbing for the MFA token service: env config, tracing setup,
//! request ids, health reporting and serde helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
