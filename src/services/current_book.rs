//! Current-book resolver
//!
//! Keeps a pointer to the session's active book in the session store.
//! Resolution never fails: a missing, malformed or stale pointer, or a
//! store outage, all resolve to "no current book".

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::Book,
    scope::{BookId, ScopeContext},
    services::sessions::{Session, SessionStore},
};

/// Session key holding the current book id
pub const CURRENT_BOOK_KEY: &str = "current_book";

/// Fresh lookup of a book by id
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookLookup: Send + Sync {
    async fn find_book(&self, id: BookId) -> AppResult<Option<Book>>;
}

#[derive(Clone)]
pub struct CurrentBookService {
    sessions: Arc<dyn SessionStore>,
    books: Arc<dyn BookLookup>,
}

impl CurrentBookService {
    pub fn new(sessions: Arc<dyn SessionStore>, books: Arc<dyn BookLookup>) -> Self {
        Self { sessions, books }
    }

    /// The session's current book, if it points at a book that still exists
    pub async fn get_current_book(&self, session: &Session) -> Option<Book> {
        let raw = match self.sessions.get_value(&session.id, CURRENT_BOOK_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read current book from session");
                return None;
            }
        };

        let Ok(id) = raw.parse::<BookId>() else {
            tracing::debug!(value = %raw, "Ignoring malformed current book pointer");
            return None;
        };

        match self.books.find_book(id).await {
            Ok(book) => book,
            Err(e) => {
                tracing::warn!(book_id = id, error = %e, "Could not look up current book");
                None
            }
        }
    }

    pub async fn resolve_current_book(&self, session: &Session) -> Option<BookId> {
        self.get_current_book(session).await.map(|book| book.id)
    }

    /// Scope for a request made within `session`
    pub async fn scope(&self, session: &Session) -> ScopeContext {
        ScopeContext::new(self.resolve_current_book(session).await)
    }

    /// Point the session at `book_id`, overwriting any previous value
    pub async fn set_current_book(&self, session: &Session, book_id: BookId) -> AppResult<()> {
        self.sessions
            .set_value(&session.id, CURRENT_BOOK_KEY, &book_id.to_string())
            .await
    }

    /// Make `book_id` current if it (still) names a book.
    ///
    /// Runs after a book request completed; returns the book made current,
    /// or `None` when there was nothing to mark.
    pub async fn mark_current(&self, session: &Session, book_id: BookId) -> Option<BookId> {
        match self.books.find_book(book_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(book_id, error = %e, "Could not look up book to mark current");
                return None;
            }
        }

        match self.set_current_book(session, book_id).await {
            Ok(()) => {
                tracing::debug!(book_id, user_id = session.user_id, "Current book set");
                Some(book_id)
            }
            Err(e) => {
                tracing::warn!(book_id, error = %e, "Could not store current book");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, services::sessions::MockSessionStore};
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    fn session() -> Session {
        Session {
            id: "s1".to_string(),
            user_id: 1,
        }
    }

    fn book(id: BookId) -> Book {
        Book {
            id,
            title: Some(format!("Book {}", id)),
            summary: None,
            author: 1,
            cover: None,
            label: String::new(),
        }
    }

    /// Session store mock backed by a shared map
    fn map_store(values: Arc<Mutex<HashMap<String, String>>>) -> MockSessionStore {
        let mut store = MockSessionStore::new();
        let reads = values.clone();
        store.expect_get_value().returning(move |_, key| {
            Ok(reads.lock().unwrap().get(key).cloned())
        });
        store.expect_set_value().returning(move |_, key, value| {
            values.lock().unwrap().insert(key.to_string(), value.to_string());
            Ok(())
        });
        store
    }

    /// Lookup mock knowing exactly `existing`
    fn lookup(existing: Vec<BookId>) -> MockBookLookup {
        let mut books = MockBookLookup::new();
        books
            .expect_find_book()
            .returning(move |id| Ok(existing.contains(&id).then(|| book(id))));
        books
    }

    fn service(store: MockSessionStore, books: MockBookLookup) -> CurrentBookService {
        CurrentBookService::new(Arc::new(store), Arc::new(books))
    }

    #[tokio::test]
    async fn test_fresh_session_has_no_current_book() {
        let values = Arc::new(Mutex::new(HashMap::new()));
        let service = service(map_store(values), lookup(vec![1]));

        assert!(service.get_current_book(&session()).await.is_none());
        assert_eq!(service.scope(&session()).await, ScopeContext::unscoped());
    }

    #[tokio::test]
    async fn test_set_then_get_returns_book() {
        let values = Arc::new(Mutex::new(HashMap::new()));
        let service = service(map_store(values), lookup(vec![4, 5]));

        service.set_current_book(&session(), 4).await.unwrap();
        assert_eq!(service.resolve_current_book(&session()).await, Some(4));

        service.set_current_book(&session(), 5).await.unwrap();
        let current = service.get_current_book(&session()).await.unwrap();
        assert_eq!(current.id, 5);
    }

    #[tokio::test]
    async fn test_deleted_book_resolves_to_none() {
        let values = Arc::new(Mutex::new(HashMap::from([(
            CURRENT_BOOK_KEY.to_string(),
            "9".to_string(),
        )])));
        let service = service(map_store(values), lookup(vec![1]));

        assert_eq!(service.resolve_current_book(&session()).await, None);
    }

    #[tokio::test]
    async fn test_malformed_pointer_resolves_to_none() {
        let values = Arc::new(Mutex::new(HashMap::from([(
            CURRENT_BOOK_KEY.to_string(),
            "not-a-number".to_string(),
        )])));
        let mut books = MockBookLookup::new();
        books.expect_find_book().never();
        let service = service(map_store(values), books);

        assert_eq!(service.resolve_current_book(&session()).await, None);
    }

    #[tokio::test]
    async fn test_store_failure_resolves_to_none() {
        let mut store = MockSessionStore::new();
        store
            .expect_get_value()
            .returning(|_, _| Err(AppError::SessionStore("down".into())));
        let service = service(store, lookup(vec![1]));

        assert_eq!(service.scope(&session()).await.current_book, None);
    }

    #[tokio::test]
    async fn test_mark_current_existing_book() {
        let values = Arc::new(Mutex::new(HashMap::new()));
        let service = service(map_store(values.clone()), lookup(vec![2]));

        assert_eq!(service.mark_current(&session(), 2).await, Some(2));
        assert_eq!(
            values.lock().unwrap().get(CURRENT_BOOK_KEY).map(String::as_str),
            Some("2")
        );
    }

    #[tokio::test]
    async fn test_mark_current_missing_book_keeps_previous_pointer() {
        let values = Arc::new(Mutex::new(HashMap::from([(
            CURRENT_BOOK_KEY.to_string(),
            "1".to_string(),
        )])));
        let service = service(map_store(values.clone()), lookup(vec![1]));

        assert_eq!(service.mark_current(&session(), 3).await, None);
        assert_eq!(service.resolve_current_book(&session()).await, Some(1));
    }

    #[tokio::test]
    async fn test_mark_current_swallows_store_errors() {
        let mut store = MockSessionStore::new();
        store
            .expect_set_value()
            .returning(|_, _, _| Err(AppError::SessionStore("down".into())));
        let service = service(store, lookup(vec![2]));

        assert_eq!(service.mark_current(&session(), 2).await, None);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let mut store = MockSessionStore::new();
        store.expect_get_value().returning(|session_id, _| {
            Ok((session_id == "s1").then(|| "1".to_string()))
        });
        let service = service(store, lookup(vec![1]));

        let other = Session {
            id: "s2".to_string(),
            user_id: 2,
        };
        assert_eq!(service.resolve_current_book(&session()).await, Some(1));
        assert_eq!(service.resolve_current_book(&other).await, None);
    }
}
