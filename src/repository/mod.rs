//! Repository layer for database operations

/// Push `column = <value>` onto a `SET` list when an update field is present
macro_rules! set_column {
    ($sets:ident, $dirty:ident, $value:expr, $column:literal) => {
        if let Some(value) = $value {
            $sets.push(concat!($column, " = ")).push_bind_unseparated(value);
            $dirty = true;
        }
    };
}

pub mod books;
pub mod chapters;
pub mod characters;
pub mod exchanges;
pub mod places;
pub mod props;
pub mod resources;
pub mod scenes;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub resources: resources::ResourcesRepository,
    pub books: books::BooksRepository,
    pub chapters: chapters::ChaptersRepository,
    pub places: places::PlacesRepository,
    pub props: props::PropsRepository,
    pub characters: characters::CharactersRepository,
    pub scenes: scenes::ScenesRepository,
    pub exchanges: exchanges::ExchangesRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            resources: resources::ResourcesRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            chapters: chapters::ChaptersRepository::new(pool.clone()),
            places: places::PlacesRepository::new(pool.clone()),
            props: props::PropsRepository::new(pool.clone()),
            characters: characters::CharactersRepository::new(pool.clone()),
            scenes: scenes::ScenesRepository::new(pool.clone()),
            exchanges: exchanges::ExchangesRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database (readiness probe)
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
