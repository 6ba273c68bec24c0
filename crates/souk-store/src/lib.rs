//! # Souk Store - Storage Abstraction Layer
//!
//! Capability traits for the credential, tenant, and session stores, plus
//! in-memory backends. The auth engine depends only on these traits so an
//! in-memory fake can back unit tests without a real database or cache.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use souk_types::{StoreResult, Tenant, User};
use uuid::Uuid;

pub mod keys;
pub mod memory;
#[cfg(feature = "redis")]
pub mod redis;

pub use memory::{MemorySessionStore, MemoryTenantStore, MemoryUserStore};

#[cfg(feature = "redis")]
pub use redis::RedisSessionStore;

/// Credential store: persists user records
///
/// Email lookups are scoped to a tenant; the same email may exist under
/// different tenants.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by email within a tenant (exact match as stored)
    async fn find_by_email(&self, tenant_id: Uuid, email: &str) -> StoreResult<Option<User>>;

    /// Find a user by id across all tenants
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Persist a new user; fails with `Conflict` if the (tenant, email)
    /// pair already exists
    async fn create(&self, user: User) -> StoreResult<User>;

    /// Replace an existing user record
    async fn update(&self, user: User) -> StoreResult<User>;

    /// Record a successful login timestamp
    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<()>;
}

/// Tenant store, read-only from this service's perspective
#[async_trait]
pub trait TenantStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Tenant>>;

    async fn find_by_subdomain(&self, subdomain: &str) -> StoreResult<Option<Tenant>>;
}

/// Key-value session store holding the single valid refresh token per user
///
/// `set` is a single atomic overwrite, never a read-modify-write; `delete`
/// of an absent key is not an error.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()>;

    async fn delete(&self, key: &str) -> StoreResult<()>;
}
