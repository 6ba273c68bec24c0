//! User account types
//!
//! The `password_hash` field never leaves the service: it is skipped during
//! serialization and cleared via [`User::sanitized`] before a user value is
//! returned to any caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Role;

/// A user account, scoped to exactly one tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    /// Tenant that owns this account; email is unique within it
    pub tenant_id: Uuid,

    pub email: String,

    /// Argon2 PHC string; empty after sanitization
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    pub role: Role,

    /// Only active accounts may log in
    pub is_active: bool,

    pub is_verified: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Construct a freshly registered user: active, unverified, customer role
    pub fn new(tenant_id: Uuid, email: String, password_hash: String, profile: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            email,
            password_hash,
            full_name: profile.full_name,
            phone: profile.phone,
            role: Role::Customer,
            is_active: true,
            is_verified: false,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Return a copy with the password hash cleared
    pub fn sanitized(&self) -> Self {
        let mut user = self.clone();
        user.password_hash = String::new();
        user
    }
}

/// Registration profile fields supplied by the caller
///
/// The plaintext password travels separately and is discarded immediately
/// after hashing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub full_name: Option<String>,
    pub phone: Option<String>,
}
