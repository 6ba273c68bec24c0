//! In-memory store backends for testing and development

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use souk_types::{StoreError, StoreResult, Tenant, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{SessionStore, TenantStore, UserStore};

/// In-memory credential store
#[derive(Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, tenant_id: Uuid, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.tenant_id == tenant_id && u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn create(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        let duplicate = users
            .values()
            .any(|u| u.tenant_id == user.tenant_id && u.email == user.email);
        if duplicate {
            return Err(StoreError::Conflict);
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(user)
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<()> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.last_login_at = Some(at);
                user.updated_at = at;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }
}

/// In-memory tenant store
#[derive(Default)]
pub struct MemoryTenantStore {
    tenants: Arc<RwLock<HashMap<Uuid, Tenant>>>,
}

impl MemoryTenantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a tenant (development and test setup)
    pub async fn insert(&self, tenant: Tenant) {
        self.tenants.write().await.insert(tenant.id, tenant);
    }
}

#[async_trait]
impl TenantStore for MemoryTenantStore {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Tenant>> {
        let tenants = self.tenants.read().await;
        Ok(tenants.get(&id).cloned())
    }

    async fn find_by_subdomain(&self, subdomain: &str) -> StoreResult<Option<Tenant>> {
        let tenants = self.tenants.read().await;
        Ok(tenants.values().find(|t| t.subdomain == subdomain).cloned())
    }
}

/// An entry with its expiry deadline
struct SessionEntry {
    value: String,
    expires_at: Instant,
}

/// In-memory session store with lazy TTL expiry
///
/// Entries past their deadline are treated as absent on read and dropped on
/// the next write touching the key.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: Arc<RwLock<HashMap<String, SessionEntry>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|e| e.expires_at > Instant::now())
            .map(|e| e.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()> {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            SessionEntry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use souk_types::NewUser;

    use super::*;

    fn user(tenant_id: Uuid, email: &str) -> User {
        User::new(tenant_id, email.into(), "$argon2id$fake".into(), NewUser::default())
    }

    #[tokio::test]
    async fn test_create_and_find_by_email() {
        let store = MemoryUserStore::new();
        let tenant = Uuid::new_v4();

        store.create(user(tenant, "alice@example.com")).await.unwrap();

        let found = store.find_by_email(tenant, "alice@example.com").await.unwrap();
        assert!(found.is_some());

        let missing = store.find_by_email(tenant, "bob@example.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_email_conflicts() {
        let store = MemoryUserStore::new();
        let tenant = Uuid::new_v4();

        store.create(user(tenant, "alice@example.com")).await.unwrap();
        let result = store.create(user(tenant, "alice@example.com")).await;

        assert!(matches!(result, Err(StoreError::Conflict)));
    }

    #[tokio::test]
    async fn test_same_email_different_tenants() {
        let store = MemoryUserStore::new();

        store.create(user(Uuid::new_v4(), "alice@example.com")).await.unwrap();
        let result = store.create(user(Uuid::new_v4(), "alice@example.com")).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_email_lookup_is_tenant_scoped() {
        let store = MemoryUserStore::new();
        let tenant_a = Uuid::new_v4();
        let tenant_b = Uuid::new_v4();

        store.create(user(tenant_a, "alice@example.com")).await.unwrap();

        let found = store.find_by_email(tenant_b, "alice@example.com").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_update_last_login() {
        let store = MemoryUserStore::new();
        let u = store.create(user(Uuid::new_v4(), "alice@example.com")).await.unwrap();

        let at = Utc::now();
        store.update_last_login(u.id, at).await.unwrap();

        let reloaded = store.find_by_id(u.id).await.unwrap().unwrap();
        assert_eq!(reloaded.last_login_at, Some(at));
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let store = MemoryUserStore::new();
        let result = store.update(user(Uuid::new_v4(), "ghost@example.com")).await;
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_tenant_store_lookup() {
        let store = MemoryTenantStore::new();
        let tenant = Tenant::new("shop1", "Shop One");
        let id = tenant.id;
        store.insert(tenant).await;

        assert!(store.find_by_id(id).await.unwrap().is_some());
        assert!(store.find_by_subdomain("shop1").await.unwrap().is_some());
        assert!(store.find_by_subdomain("shop2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_session_set_get_delete() {
        let store = MemorySessionStore::new();

        store.set("refresh_token:u1", "tok-1", Duration::from_secs(60)).await.unwrap();
        assert_eq!(store.get("refresh_token:u1").await.unwrap().as_deref(), Some("tok-1"));

        store.delete("refresh_token:u1").await.unwrap();
        assert!(store.get("refresh_token:u1").await.unwrap().is_none());

        // Deleting an absent key is not an error
        store.delete("refresh_token:u1").await.unwrap();
    }

    #[tokio::test]
    async fn test_session_overwrite_replaces_value() {
        let store = MemorySessionStore::new();

        store.set("refresh_token:u1", "tok-1", Duration::from_secs(60)).await.unwrap();
        store.set("refresh_token:u1", "tok-2", Duration::from_secs(60)).await.unwrap();

        assert_eq!(store.get("refresh_token:u1").await.unwrap().as_deref(), Some("tok-2"));
    }

    #[tokio::test]
    async fn test_session_ttl_expiry() {
        let store = MemorySessionStore::new();

        store.set("refresh_token:u1", "tok-1", Duration::from_millis(10)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert!(store.get("refresh_token:u1").await.unwrap().is_none());
    }
}
