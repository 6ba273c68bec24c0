//! Startup seeding
//!
//! The user and tenant stores are in-memory, so a fresh instance starts
//! with no tenant to register under. Seed one so the service is usable
//! out of the box.

use souk_store::MemoryTenantStore;
use souk_types::Tenant;

pub const DEV_TENANT_SUBDOMAIN: &str = "demo";

/// Create the development tenant and return it
pub async fn seed_dev_tenant(tenants: &MemoryTenantStore) -> Tenant {
    let tenant = Tenant::new(DEV_TENANT_SUBDOMAIN, "Demo Marketplace");
    tenants.insert(tenant.clone()).await;
    tracing::info!(
        tenant_id = %tenant.id,
        subdomain = DEV_TENANT_SUBDOMAIN,
        "seeded development tenant"
    );
    tenant
}

#[cfg(test)]
mod tests {
    use super::*;
    use souk_store::TenantStore;

    #[tokio::test]
    async fn test_seed_is_resolvable_by_subdomain() {
        let tenants = MemoryTenantStore::new();
        let seeded = seed_dev_tenant(&tenants).await;

        let found = tenants
            .find_by_subdomain(DEV_TENANT_SUBDOMAIN)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, seeded.id);
    }
}
