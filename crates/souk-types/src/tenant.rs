//! Tenant types
//!
//! Tenants are read-only from the auth engine's perspective: they scope
//! users and stamp tokens, nothing else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An isolated customer/organization namespace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,

    /// Label resolved from `<subdomain>.platform.example`
    pub subdomain: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_domain: Option<String>,

    pub name: String,

    pub status: TenantStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tenant {
    pub fn new(subdomain: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            subdomain: subdomain.into(),
            custom_domain: None,
            name: name.into(),
            status: TenantStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    Active,
    Suspended,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tenant_is_active() {
        let tenant = Tenant::new("shop1", "Shop One");
        assert_eq!(tenant.status, TenantStatus::Active);
        assert_eq!(tenant.subdomain, "shop1");
    }
}
