//! Business logic services

pub mod auth;
pub mod books;
pub mod current_book;
pub mod exchanges;
pub mod redis;
pub mod scenes;
pub mod scoped;
pub mod sessions;
pub mod users;

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Chapter, Character, Place, Prop, Scene},
    repository::Repository,
};

use sessions::SessionStore;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub current_book: current_book::CurrentBookService,
    pub books: books::BooksService,
    pub chapters: scoped::ScopedService<Chapter>,
    pub places: scoped::ScopedService<Place>,
    pub props: scoped::ScopedService<Prop>,
    pub characters: scoped::ScopedService<Character>,
    pub scenes: scoped::ScopedService<Scene>,
    pub exchanges: exchanges::ExchangesService,
    pub users: users::UsersService,
    repository: Repository,
    sessions: Arc<dyn SessionStore>,
}

impl Services {
    /// Create all services over the given repository and session store
    pub fn new(repository: Repository, sessions: Arc<dyn SessionStore>) -> Self {
        let books_lookup = Arc::new(repository.books.clone());
        Self {
            auth: auth::AuthService::new(repository.clone(), sessions.clone()),
            current_book: current_book::CurrentBookService::new(sessions.clone(), books_lookup),
            books: books::BooksService::new(repository.clone()),
            chapters: scoped::ScopedService::new(repository.clone()),
            places: scoped::ScopedService::new(repository.clone()),
            props: scoped::ScopedService::new(repository.clone()),
            characters: scoped::ScopedService::new(repository.clone()),
            scenes: scoped::ScopedService::new(repository.clone()),
            exchanges: exchanges::ExchangesService::new(repository.clone()),
            users: users::UsersService::new(repository.clone()),
            repository,
            sessions,
        }
    }

    /// Check that the database and the session store answer
    pub async fn ready(&self) -> AppResult<()> {
        self.repository.ping().await?;
        self.sessions.ping().await
    }
}
