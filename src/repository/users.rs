//! Users repository for database operations

use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::{
        user::{CreateUser, UpdateUser, User, UserQuery},
        Page,
    },
    scope::Resource,
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &UserQuery) {
    qb.push(" WHERE TRUE");
    if let Some(ref first_name) = query.first_name {
        qb.push(" AND first_name = ").push_bind(first_name.clone());
    }
    if let Some(ref last_name) = query.last_name {
        qb.push(" AND last_name = ").push_bind(last_name.clone());
    }
    if !query.ids.is_empty() {
        qb.push(" AND id = ANY(").push_bind(query.ids.clone()).push(")");
    }
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(User::labelled)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Get user by username (authentication)
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user.map(User::labelled))
    }

    /// List users matching exact first/last name filters
    pub async fn list(&self, query: &UserQuery, page: Page) -> AppResult<(Vec<User>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users");
        push_filters(&mut count, query);
        let (total,) = count.build_query_as::<(i64,)>().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::<Postgres>::new("SELECT * FROM users");
        push_filters(&mut select, query);
        select.push(" ORDER BY username, id");
        if let Some((limit, offset)) = page.limit_offset() {
            select.push(" LIMIT ").push_bind(limit);
            select.push(" OFFSET ").push_bind(offset);
        }

        let users = select.build_query_as::<User>().fetch_all(&self.pool).await?;
        Ok((users.into_iter().map(User::labelled).collect(), total))
    }

    /// Insert a user; `password_hash` is already hashed
    pub async fn create(&self, data: &CreateUser, password_hash: Option<String>) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, first_name, last_name, password)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.username)
        .bind(&data.email)
        .bind(data.first_name.clone().unwrap_or_default())
        .bind(data.last_name.clone().unwrap_or_default())
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(user.labelled())
    }

    pub async fn update(&self, id: i32, data: UpdateUser, password_hash: Option<String>) -> AppResult<()> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE users SET ");
        let mut dirty = false;
        {
            let mut sets = qb.separated(", ");
            set_column!(sets, dirty, data.username, "username");
            set_column!(sets, dirty, data.email, "email");
            set_column!(sets, dirty, data.first_name, "first_name");
            set_column!(sets, dirty, data.last_name, "last_name");
            set_column!(sets, dirty, password_hash, "password");
        }
        if dirty {
            qb.push(" WHERE id = ").push_bind(id);
            qb.build().execute(&self.pool).await?;
        }
        Ok(())
    }
}
