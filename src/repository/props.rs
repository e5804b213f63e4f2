//! Props repository

use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::AppResult,
    models::prop::{CreateProp, UpdateProp},
    scope::BookId,
};

#[derive(Clone)]
pub struct PropsRepository {
    pool: Pool<Postgres>,
}

impl PropsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a prop into `book`, returning its id
    pub async fn create(&self, book: BookId, data: &CreateProp) -> AppResult<i32> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO props (book_id, name, description) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(book)
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    pub async fn update(&self, id: i32, data: UpdateProp) -> AppResult<()> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE props SET ");
        let mut dirty = false;
        {
            let mut sets = qb.separated(", ");
            set_column!(sets, dirty, data.book, "book_id");
            set_column!(sets, dirty, data.name, "name");
            set_column!(sets, dirty, data.description, "description");
        }
        if dirty {
            qb.push(" WHERE id = ").push_bind(id);
            qb.build().execute(&self.pool).await?;
        }
        Ok(())
    }
}
