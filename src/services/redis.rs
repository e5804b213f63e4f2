//! Redis-backed session store

use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    services::sessions::{Session, SessionStore},
};

const USER_ID_FIELD: &str = "user_id";

fn session_key(session_id: &str) -> String {
    format!("session:{}", session_id)
}

/// Sessions stored as Redis hashes `session:{id}` expiring after `ttl_seconds`
#[derive(Clone)]
pub struct RedisSessionStore {
    client: Client,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    /// Create a new Redis session store and check the connection
    pub async fn new(url: &str, ttl_seconds: u64) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        let store = Self { client, ttl_seconds };
        store.ping().await?;
        Ok(store)
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::SessionStore(format!("Failed to get Redis connection: {}", e)))
    }

    /// Write one field and push the expiry forward
    async fn write_field(&self, session_id: &str, field: &str, value: &str) -> AppResult<()> {
        let mut conn = self.connection().await?;
        let key = session_key(session_id);
        redis::pipe()
            .atomic()
            .hset(&key, field, value)
            .ignore()
            .expire(&key, self.ttl_seconds as i64)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, user_id: i32) -> AppResult<Session> {
        let id = Uuid::new_v4().simple().to_string();
        self.write_field(&id, USER_ID_FIELD, &user_id.to_string()).await?;
        tracing::debug!(user_id, "Session opened");
        Ok(Session { id, user_id })
    }

    async fn load(&self, session_id: &str) -> AppResult<Option<Session>> {
        let mut conn = self.connection().await?;
        let user_id: Option<String> = conn.hget(session_key(session_id), USER_ID_FIELD).await?;

        Ok(user_id
            .and_then(|raw| raw.parse::<i32>().ok())
            .map(|user_id| Session {
                id: session_id.to_string(),
                user_id,
            }))
    }

    async fn get_value(&self, session_id: &str, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.hget(session_key(session_id), key).await?;
        Ok(value)
    }

    async fn set_value(&self, session_id: &str, key: &str, value: &str) -> AppResult<()> {
        self.write_field(session_id, key, value).await
    }

    async fn destroy(&self, session_id: &str) -> AppResult<()> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(session_key(session_id)).await?;
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection().await?;
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::SessionStore(format!("Redis connection test failed: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key_is_namespaced() {
        assert_eq!(session_key("abc"), "session:abc");
    }
}
