//! Scenes repository

use sqlx::{Pool, Postgres, QueryBuilder, Transaction};

use crate::{
    error::AppResult,
    models::scene::{CreateScene, UpdateScene},
    scope::BookId,
};

#[derive(Clone)]
pub struct ScenesRepository {
    pool: Pool<Postgres>,
}

/// Replace the participant list of a scene
async fn set_characters(
    tx: &mut Transaction<'_, Postgres>,
    scene: i32,
    characters: &[i32],
) -> AppResult<()> {
    sqlx::query("DELETE FROM scene_characters WHERE scene_id = $1")
        .bind(scene)
        .execute(&mut **tx)
        .await?;
    sqlx::query(
        r#"
        INSERT INTO scene_characters (scene_id, character_id)
        SELECT $1, c FROM UNNEST($2::INTEGER[]) AS c
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(scene)
    .bind(characters.to_vec())
    .execute(&mut **tx)
    .await?;
    Ok(())
}

impl ScenesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a scene and its participants into `book`, returning its id
    pub async fn create(&self, book: BookId, data: &CreateScene) -> AppResult<i32> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO scenes (book_id, ordernum, timestamp, short_description, summary,
                                long_description, chapter_id, place_id, image)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(book)
        .bind(data.ordernum.unwrap_or(0))
        .bind(data.timestamp)
        .bind(&data.short_description)
        .bind(&data.summary)
        .bind(&data.long_description)
        .bind(data.chapter)
        .bind(data.place)
        .bind(&data.image)
        .fetch_one(&mut *tx)
        .await?;

        set_characters(&mut tx, id, &data.characters).await?;

        tx.commit().await?;
        Ok(id)
    }

    pub async fn update(&self, id: i32, data: UpdateScene) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE scenes SET ");
        let mut dirty = false;
        {
            let mut sets = qb.separated(", ");
            set_column!(sets, dirty, data.book, "book_id");
            set_column!(sets, dirty, data.ordernum, "ordernum");
            set_column!(sets, dirty, data.timestamp, "timestamp");
            set_column!(sets, dirty, data.short_description, "short_description");
            set_column!(sets, dirty, data.summary, "summary");
            set_column!(sets, dirty, data.long_description, "long_description");
            set_column!(sets, dirty, data.chapter, "chapter_id");
            set_column!(sets, dirty, data.place, "place_id");
            set_column!(sets, dirty, data.image, "image");
        }
        if dirty {
            qb.push(" WHERE id = ").push_bind(id);
            qb.build().execute(&mut *tx).await?;
        }

        if let Some(characters) = data.characters {
            set_characters(&mut tx, id, &characters).await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
