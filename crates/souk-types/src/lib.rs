//! # Souk Types
//!
//! Shared type definitions for the souk identity service.
//!
//! This crate provides the domain types used across the workspace,
//! ensuring a single source of truth and preventing circular dependencies.

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod auth;
mod tenant;
mod user;

pub use auth::{AuthContext, Role};
pub use tenant::{Tenant, TenantStatus};
pub use user::{NewUser, User};

// ============================================================================
// Error Types
// ============================================================================

/// Errors surfaced by the store traits
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found")]
    NotFound,

    #[error("Conflict")]
    Conflict,

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

// ============================================================================
// Token Types
// ============================================================================

/// Discriminant carried in every token's `type` claim
///
/// An access token is never accepted where a refresh token is required and
/// vice versa; the codec validates this field at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenType::Access => write!(f, "access"),
            TokenType::Refresh => write!(f, "refresh"),
        }
    }
}
