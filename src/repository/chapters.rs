//! Chapters repository

use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::AppResult,
    models::chapter::{CreateChapter, UpdateChapter},
    scope::BookId,
};

#[derive(Clone)]
pub struct ChaptersRepository {
    pool: Pool<Postgres>,
}

impl ChaptersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a chapter into `book`, returning its id
    pub async fn create(&self, book: BookId, data: &CreateChapter) -> AppResult<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO chapters (book_id, number, title, summary)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(book)
        .bind(data.number.unwrap_or(0))
        .bind(&data.title)
        .bind(&data.summary)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    pub async fn update(&self, id: i32, data: UpdateChapter) -> AppResult<()> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE chapters SET ");
        let mut dirty = false;
        {
            let mut sets = qb.separated(", ");
            set_column!(sets, dirty, data.book, "book_id");
            set_column!(sets, dirty, data.number, "number");
            set_column!(sets, dirty, data.title, "title");
            set_column!(sets, dirty, data.summary, "summary");
        }
        if dirty {
            qb.push(" WHERE id = ").push_bind(id);
            qb.build().execute(&self.pool).await?;
        }
        Ok(())
    }
}
