//! Characters repository

use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::AppResult,
    models::character::{CreateCharacter, UpdateCharacter},
    scope::BookId,
};

#[derive(Clone)]
pub struct CharactersRepository {
    pool: Pool<Postgres>,
}

impl CharactersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a character into `book`, returning its id
    pub async fn create(&self, book: BookId, data: &CreateCharacter) -> AppResult<i32> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO characters (book_id, name, notes) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(book)
        .bind(&data.name)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    pub async fn update(&self, id: i32, data: UpdateCharacter) -> AppResult<()> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE characters SET ");
        let mut dirty = false;
        {
            let mut sets = qb.separated(", ");
            set_column!(sets, dirty, data.book, "book_id");
            set_column!(sets, dirty, data.name, "name");
            set_column!(sets, dirty, data.notes, "notes");
        }
        if dirty {
            qb.push(" WHERE id = ").push_bind(id);
            qb.build().execute(&self.pool).await?;
        }
        Ok(())
    }
}
