//! Inventory exchanges repository

use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::AppResult,
    models::exchange::{CreateExchange, UpdateExchange},
};

#[derive(Clone)]
pub struct ExchangesRepository {
    pool: Pool<Postgres>,
}

impl ExchangesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: &CreateExchange) -> AppResult<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO inventory_exchanges (scene_id, from_char_id, to_char_id, prop_id, note)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(data.scene)
        .bind(data.from_char)
        .bind(data.to_char)
        .bind(data.prop)
        .bind(&data.note)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    pub async fn update(&self, id: i32, data: UpdateExchange) -> AppResult<()> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE inventory_exchanges SET ");
        let mut dirty = false;
        {
            let mut sets = qb.separated(", ");
            set_column!(sets, dirty, data.scene, "scene_id");
            set_column!(sets, dirty, data.from_char, "from_char_id");
            set_column!(sets, dirty, data.to_char, "to_char_id");
            set_column!(sets, dirty, data.prop, "prop_id");
            set_column!(sets, dirty, data.note, "note");
        }
        if dirty {
            qb.push(" WHERE id = ").push_bind(id);
            qb.build().execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Owning book of a scene, `None` if the scene does not exist
    pub async fn book_of_scene(&self, scene: i32) -> AppResult<Option<i32>> {
        let book = sqlx::query_scalar("SELECT book_id FROM scenes WHERE id = $1")
            .bind(scene)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }
}
