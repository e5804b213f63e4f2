//! User management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        user::{CreateUser, UpdateUser, UserQuery},
        Page, User,
    },
    repository::Repository,
    services::auth::hash_password,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &UserQuery) -> AppResult<(Vec<User>, i64)> {
        let page = Page::new(&query.ids, query.page, query.per_page);
        self.repository.users.list(query, page).await
    }

    pub async fn get(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    async fn ensure_username_free(&self, username: &str, except: Option<i32>) -> AppResult<()> {
        match self.repository.users.get_by_username(username).await? {
            Some(user) if Some(user.id) != except => Err(AppError::Conflict(format!(
                "Username '{}' already exists",
                username
            ))),
            _ => Ok(()),
        }
    }

    pub async fn create(&self, data: CreateUser) -> AppResult<User> {
        data.validate()?;
        self.ensure_username_free(&data.username, None).await?;

        let password_hash = data.password.as_deref().map(hash_password).transpose()?;
        let user = self.repository.users.create(&data, password_hash).await?;
        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    pub async fn update(&self, id: i32, data: UpdateUser) -> AppResult<User> {
        data.validate()?;
        self.get(id).await?;
        if let Some(ref username) = data.username {
            self.ensure_username_free(username, Some(id)).await?;
        }

        let password_hash = data.password.as_deref().map(hash_password).transpose()?;
        self.repository.users.update(id, data, password_hash).await?;
        self.get(id).await
    }

    /// Delete a user and, through the foreign keys, every book they author
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.resources.delete::<User>(None, id).await?;
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}
