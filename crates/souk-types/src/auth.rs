//! Authentication types shared across the workspace

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User role, ordered from least to most privileged
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Admin,
    SuperAdmin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Customer => write!(f, "customer"),
            Role::Admin => write!(f, "admin"),
            Role::SuperAdmin => write!(f, "super_admin"),
        }
    }
}

/// Identity attached to a request after access-token validation
///
/// Inserted into request extensions by the auth middleware and consumed by
/// handlers through the `RequireAuth` extractor; handlers never look this
/// up by untyped key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    pub user_id: Uuid,

    /// Tenant the token was issued under; tenant-enforced routes cross-check
    /// this against the resolved request tenant
    pub tenant_id: Uuid,

    pub email: String,

    pub role: Role,

    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthContext {
    /// Check whether this identity's role appears in a route allow-list
    pub fn has_role(&self, allowed: &[Role]) -> bool {
        allowed.contains(&self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(role: Role) -> AuthContext {
        AuthContext {
            user_id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            email: "alice@example.com".into(),
            role,
            issued_at: Utc::now(),
            expires_at: Utc::now() + chrono::Duration::seconds(900),
        }
    }

    #[test]
    fn test_role_serde_snake_case() {
        assert_eq!(serde_json::to_string(&Role::SuperAdmin).unwrap(), "\"super_admin\"");
        let parsed: Role = serde_json::from_str("\"customer\"").unwrap();
        assert_eq!(parsed, Role::Customer);
    }

    #[test]
    fn test_has_role_in_allow_list() {
        let ctx = context(Role::Admin);
        assert!(ctx.has_role(&[Role::Admin, Role::SuperAdmin]));
        assert!(!ctx.has_role(&[Role::SuperAdmin]));
        assert!(!ctx.has_role(&[]));
    }

    #[test]
    fn test_role_ordering() {
        assert!(Role::Customer < Role::Admin);
        assert!(Role::Admin < Role::SuperAdmin);
    }
}
