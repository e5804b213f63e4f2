//! Authentication service: password checks and session lifecycle

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::{
    error::{AppError, AppResult},
    models::User,
    repository::Repository,
    services::sessions::{Session, SessionStore},
};

const BAD_CREDENTIALS: &str = "Wrong username or password";

/// Hash a password with argon2 and a random salt
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Check `password` against a stored argon2 hash. Users without a
/// password can never log in.
pub fn verify_password(user: &User, password: &str) -> bool {
    let Some(stored) = user.password.as_deref() else {
        return false;
    };
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(user_id = user.id, error = %e, "Stored password hash is unreadable");
            false
        }
    }
}

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    sessions: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(repository: Repository, sessions: Arc<dyn SessionStore>) -> Self {
        Self { repository, sessions }
    }

    /// Check credentials and open a session
    pub async fn login(&self, username: &str, password: &str) -> AppResult<(Session, User)> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| AppError::Authentication(BAD_CREDENTIALS.to_string()))?;

        if !verify_password(&user, password) {
            tracing::info!(username, "Rejected login");
            return Err(AppError::Authentication(BAD_CREDENTIALS.to_string()));
        }

        let session = self.sessions.create(user.id).await?;
        tracing::info!(user_id = user.id, "User logged in");
        Ok((session, user))
    }

    pub async fn logout(&self, session: &Session) -> AppResult<()> {
        self.sessions.destroy(&session.id).await?;
        tracing::info!(user_id = session.user_id, "User logged out");
        Ok(())
    }

    /// Session for a cookie value, `None` if unknown or expired
    pub async fn session(&self, session_id: &str) -> AppResult<Option<Session>> {
        self.sessions.load(session_id).await
    }

    /// The user behind a session
    pub async fn me(&self, session: &Session) -> AppResult<User> {
        self.repository.users.get_by_id(session.user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(password: Option<String>) -> User {
        User {
            id: 1,
            username: "frank".into(),
            email: None,
            first_name: String::new(),
            last_name: String::new(),
            password,
            is_active: true,
            date_joined: Utc::now(),
            label: String::new(),
        }
    }

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("spice").unwrap();
        assert_ne!(hash, "spice");
        assert!(verify_password(&user(Some(hash.clone())), "spice"));
        assert!(!verify_password(&user(Some(hash)), "water"));
    }

    #[test]
    fn test_user_without_password_cannot_log_in() {
        assert!(!verify_password(&user(None), ""));
    }

    #[test]
    fn test_garbage_hash_is_rejected() {
        assert!(!verify_password(&user(Some("plain".into())), "plain"));
    }
}
