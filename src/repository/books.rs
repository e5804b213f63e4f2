//! Books repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook, UpdateBook},
    scope::{BookId, Resource},
    services::current_book::BookLookup,
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID, `None` if it does not exist
    pub async fn find(&self, id: BookId) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book.map(Book::labelled))
    }

    /// Insert a book owned by `author`
    pub async fn create(&self, author: i32, data: &CreateBook) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, summary, author_id, cover)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.summary)
        .bind(author)
        .bind(&data.cover)
        .fetch_one(&self.pool)
        .await?;
        Ok(book.labelled())
    }

    /// Apply the present fields of `data`; returns false when nothing changed
    pub async fn update(&self, id: BookId, data: UpdateBook) -> AppResult<bool> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE books SET ");
        let mut dirty = false;
        {
            let mut sets = qb.separated(", ");
            set_column!(sets, dirty, data.title, "title");
            set_column!(sets, dirty, data.summary, "summary");
            set_column!(sets, dirty, data.cover, "cover");
        }
        if !dirty {
            return Ok(false);
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.build().execute(&self.pool).await?;
        Ok(true)
    }
}

#[async_trait]
impl BookLookup for BooksRepository {
    async fn find_book(&self, id: BookId) -> AppResult<Option<Book>> {
        self.find(id).await
    }
}
