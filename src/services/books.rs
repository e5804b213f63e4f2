//! Books service

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        book::{CreateBook, UpdateBook},
        Book, ListQuery,
    },
    repository::Repository,
    scope::BookId,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Every book, ordered by title. Books are not filtered by author.
    pub async fn list(&self, query: &ListQuery) -> AppResult<(Vec<Book>, i64)> {
        self.repository
            .resources
            .list::<Book>(None, &query.ids, query.page())
            .await
    }

    pub async fn get(&self, id: BookId) -> AppResult<Book> {
        self.repository.resources.get::<Book>(None, id).await
    }

    /// Create a book authored by `author`
    pub async fn create(&self, author: i32, data: CreateBook) -> AppResult<Book> {
        data.validate()?;
        let book = self.repository.books.create(author, &data).await?;
        tracing::info!(book_id = book.id, author_id = author, "Book created");
        Ok(book)
    }

    pub async fn update(&self, id: BookId, data: UpdateBook) -> AppResult<Book> {
        data.validate()?;
        self.get(id).await?;
        if self.repository.books.update(id, data).await? {
            tracing::info!(book_id = id, "Book updated");
        }
        self.get(id).await
    }

    /// Delete a book; chapters, places, props, characters and scenes go
    /// with it
    pub async fn delete(&self, id: BookId) -> AppResult<()> {
        self.repository.resources.delete::<Book>(None, id).await?;
        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }
}
