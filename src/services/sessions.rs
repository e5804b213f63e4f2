//! Per-session key/value state

use async_trait::async_trait;

use crate::error::AppResult;

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque id carried by the session cookie
    pub id: String,
    pub user_id: i32,
}

/// Storage for sessions and their values
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Open a new session for `user_id`
    async fn create(&self, user_id: i32) -> AppResult<Session>;

    /// Load a session; unknown or expired ids give `None`
    async fn load(&self, session_id: &str) -> AppResult<Option<Session>>;

    async fn get_value(&self, session_id: &str, key: &str) -> AppResult<Option<String>>;

    /// Store `value` under `key`, overwriting any previous value
    async fn set_value(&self, session_id: &str, key: &str, value: &str) -> AppResult<()>;

    async fn destroy(&self, session_id: &str) -> AppResult<()>;

    async fn ping(&self) -> AppResult<()>;
}
