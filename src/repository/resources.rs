//! Generic reads and deletes shared by every exposed resource

use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::Page,
    scope::{BookId, Resource},
};

#[derive(Clone)]
pub struct ResourcesRepository {
    pool: Pool<Postgres>,
}

fn not_found<R: Resource>(id: i32) -> AppError {
    AppError::NotFound(format!("{} {} not found", R::NAME, id))
}

/// Append the `WHERE` clause shared by list, get and delete.
///
/// `book` must only be set for resources scoped by a `book_id` column.
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, book: Option<BookId>, ids: &[i32]) {
    qb.push(" WHERE TRUE");
    if let Some(book) = book {
        qb.push(" AND book_id = ").push_bind(book);
    }
    if !ids.is_empty() {
        qb.push(" AND id = ANY(").push_bind(ids.to_vec()).push(")");
    }
}

impl ResourcesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List rows of `R`, optionally restricted to one book and a set of ids
    pub async fn list<R: Resource>(
        &self,
        book: Option<BookId>,
        ids: &[i32],
        page: Page,
    ) -> AppResult<(Vec<R>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {}", R::SOURCE));
        push_filters(&mut count, book, ids);
        let (total,) = count.build_query_as::<(i64,)>().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT * FROM {}", R::SOURCE));
        push_filters(&mut select, book, ids);
        select.push(format!(" ORDER BY {}, id", R::ORDER_BY));
        if let Some((limit, offset)) = page.limit_offset() {
            select.push(" LIMIT ").push_bind(limit);
            select.push(" OFFSET ").push_bind(offset);
        }

        let rows = select.build_query_as::<R>().fetch_all(&self.pool).await?;
        Ok((rows.into_iter().map(R::labelled).collect(), total))
    }

    /// Fetch one row of `R` if it is visible within `book`
    pub async fn find<R: Resource>(&self, book: Option<BookId>, id: i32) -> AppResult<Option<R>> {
        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT * FROM {}", R::SOURCE));
        push_filters(&mut select, book, &[]);
        select.push(" AND id = ").push_bind(id);

        let row = select.build_query_as::<R>().fetch_optional(&self.pool).await?;
        Ok(row.map(R::labelled))
    }

    /// Like [`find`](Self::find) but a missing row is an error
    pub async fn get<R: Resource>(&self, book: Option<BookId>, id: i32) -> AppResult<R> {
        self.find::<R>(book, id).await?.ok_or_else(|| not_found::<R>(id))
    }

    /// Delete one row of `R` visible within `book`; cascades are left to
    /// the foreign keys
    pub async fn delete<R: Resource>(&self, book: Option<BookId>, id: i32) -> AppResult<()> {
        let mut delete = QueryBuilder::<Postgres>::new(format!("DELETE FROM {}", R::TABLE));
        push_filters(&mut delete, book, &[]);
        delete.push(" AND id = ").push_bind(id);

        let result = delete.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(not_found::<R>(id));
        }
        Ok(())
    }

    /// Owning book of each given row of a book-scoped resource.
    /// Unknown ids are absent from the result.
    pub async fn books_of<R: Resource>(&self, ids: &[i32]) -> AppResult<Vec<(i32, BookId)>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, (i32, BookId)>(&format!(
            "SELECT id, book_id FROM {} WHERE id = ANY($1)",
            R::TABLE
        ))
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Number of rows in `references` (`(table, column)` pairs) pointing at `id`
    pub async fn count_references(&self, references: &[(&str, &str)], id: i32) -> AppResult<i64> {
        let mut total = 0;
        for (table, column) in references {
            let (count,) = sqlx::query_as::<_, (i64,)>(&format!(
                "SELECT COUNT(*) FROM {} WHERE {} = $1",
                table, column
            ))
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
            total += count;
        }
        Ok(total)
    }
}
