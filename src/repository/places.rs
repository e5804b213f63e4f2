//! Places repository

use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::AppResult,
    models::place::{CreatePlace, UpdatePlace},
    scope::BookId,
};

#[derive(Clone)]
pub struct PlacesRepository {
    pool: Pool<Postgres>,
}

impl PlacesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a place into `book`, returning its id
    pub async fn create(&self, book: BookId, data: &CreatePlace) -> AppResult<i32> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO places (book_id, name, description) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(book)
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    pub async fn update(&self, id: i32, data: UpdatePlace) -> AppResult<()> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE places SET ");
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
