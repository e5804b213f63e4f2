//! Book API endpoints
//!
//! Viewing, creating or editing a book makes it the session's current
//! book. The pointer is moved after the request ran, whatever its outcome,
//! and only when the book exists at that point.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Query;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{CreateBook, UpdateBook},
        Book, ListQuery,
    },
    scope::BookId,
};

use super::{AuthenticatedSession, PaginatedResponse};

/// List books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(ListQuery),
    responses(
        (status = 200, description = "Book list", body = PaginatedResponse<Book>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    AuthenticatedSession(_session): AuthenticatedSession,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<PaginatedResponse<Book>>> {
    let (books, total) = state.services.books.list(&query).await?;
    Ok(Json(PaginatedResponse::new(books, total, query.page())))
}

/// Get a book by ID and make it current
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(id): Path<BookId>,
) -> AppResult<Json<Book>> {
    let result = state.services.books.get(id).await;
    state.services.current_book.mark_current(&session, id).await;
    Ok(Json(result?))
}

/// Create a book authored by the logged-in user and make it current
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid data")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Json(data): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.books.create(session.user_id, data).await?;
    state.services.current_book.mark_current(&session, book.id).await;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update a book and make it current
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(id): Path<BookId>,
    body: Result<Json<UpdateBook>, JsonRejection>,
) -> AppResult<Json<Book>> {
    // a rejected update, malformed body included, still moves the pointer
    // to an existing book
    let result = match update_payload(body) {
        Ok(data) => state.services.books.update(id, data).await,
        Err(e) => Err(e),
    };
    state.services.current_book.mark_current(&session, id).await;
    Ok(Json(result?))
}

fn update_payload(body: Result<Json<UpdateBook>, JsonRejection>) -> AppResult<UpdateBook> {
    body.map(|Json(data)| data)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Delete a book with everything it contains
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(id): Path<BookId>,
) -> AppResult<StatusCode> {
    let result = state.services.books.delete(id).await;
    // no-op once the row is gone; a stale pointer resolves to no book anyway
    state.services.current_book.mark_current(&session, id).await;
    result?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get the session's current book
#[utoipa::path(
    get,
    path = "/session/current-book",
    tag = "books",
    responses(
        (status = 200, description = "Current book, null when none", body = Book),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn current_book(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
) -> Json<Option<Book>> {
    Json(state.services.current_book.get_current_book(&session).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, extract::FromRequest, http::Request};

    async fn extract(body: &'static str) -> Result<Json<UpdateBook>, JsonRejection> {
        let request = Request::builder()
            .method("PUT")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        Json::<UpdateBook>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn test_malformed_update_body_is_a_bad_request() {
        let err = update_payload(extract("{not json").await).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_update_body_is_passed_through() {
        let data = update_payload(extract(r#"{"title": "Dune"}"#).await).unwrap();
        assert_eq!(data.title, Some(Some("Dune".to_string())));
    }
}
