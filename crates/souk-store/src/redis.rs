//! Redis-backed session store
//!
//! Production backend for refresh-token sessions. `SET ... EX` gives the
//! atomic overwrite-with-TTL the session contract requires; revocation is
//! a `DEL`.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use souk_types::{StoreError, StoreResult};

use crate::SessionStore;

pub struct RedisSessionStore {
    conn: redis::aio::ConnectionManager,
}

impl RedisSessionStore {
    /// Connect to Redis at `url` (e.g. `redis://localhost:6379`)
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| StoreError::Backend(format!("invalid redis url: {e}")))?;
        let conn = client
            .get_connection_manager()
            .await
            .map_err(|e| StoreError::Backend(format!("redis connection failed: {e}")))?;
        tracing::info!("Connected to Redis session store");
        Ok(Self { conn })
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(key)
            .await
            .map_err(|e| StoreError::Backend(format!("redis GET failed: {e}")))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        // TTL below one second would round to zero and persist forever
        let seconds = ttl.as_secs().max(1);
        conn.set_ex(key, value, seconds)
            .await
            .map_err(|e| StoreError::Backend(format!("redis SET failed: {e}")))
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        conn.del(key)
            .await
            .map_err(|e| StoreError::Backend(format!("redis DEL failed: {e}")))
    }
}
