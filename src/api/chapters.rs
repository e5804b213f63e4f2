//! Chapters API endpoints
//!
//! Chapters are numbered within their book.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Query;

use crate::{
    error::AppResult,
    models::{
        chapter::{CreateChapter, UpdateChapter},
        Chapter, ListQuery,
    },
};

use super::{AuthenticatedSession, PaginatedResponse};

/// List chapters of the current book
#[utoipa::path(
    get,
    path = "/chapters",
    tag = "chapters",
    params(ListQuery),
    responses(
        (status = 200, description = "Chapters list", body = PaginatedResponse<Chapter>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_chapters(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<PaginatedResponse<Chapter>>> {
    let scope = state.services.current_book.scope(&session).await;
    let (chapters, total) = state.services.chapters.list(&scope, &query).await?;
    Ok(Json(PaginatedResponse::new(chapters, total, query.page())))
}

/// Get a chapter by ID
#[utoipa::path(
    get,
    path = "/chapters/{id}",
    tag = "chapters",
    params(("id" = i32, Path, description = "Chapter ID")),
    responses(
        (status = 200, description = "Chapter details", body = Chapter),
        (status = 404, description = "Chapter not found in the current book")
    )
)]
pub async fn get_chapter(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(id): Path<i32>,
) -> AppResult<Json<Chapter>> {
    let scope = state.services.current_book.scope(&session).await;
    let chapter = state.services.chapters.get(&scope, id).await?;
    Ok(Json(chapter))
}

/// Create a chapter in the current book
#[utoipa::path(
    post,
    path = "/chapters",
    tag = "chapters",
    request_body = CreateChapter,
    responses(
        (status = 201, description = "Chapter created", body = Chapter),
        (status = 400, description = "Invalid data or no book")
    )
)]
pub async fn create_chapter(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Json(data): Json<CreateChapter>,
) -> AppResult<(StatusCode, Json<Chapter>)> {
    let scope = state.services.current_book.scope(&session).await;
    let chapter = state.services.chapters.create(&scope, data).await?;
    Ok((StatusCode::CREATED, Json(chapter)))
}

/// Update a chapter
#[utoipa::path(
    put,
    path = "/chapters/{id}",
    tag = "chapters",
    params(("id" = i32, Path, description = "Chapter ID")),
    request_body = UpdateChapter,
    responses(
        (status = 200, description = "Chapter updated", body = Chapter),
        (status = 404, description = "Chapter not found in the current book")
    )
)]
pub async fn update_chapter(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(id): Path<i32>,
    Json(data): Json<UpdateChapter>,
) -> AppResult<Json<Chapter>> {
    let scope = state.services.current_book.scope(&session).await;
    let chapter = state.services.chapters.update(&scope, id, data).await?;
    Ok(Json(chapter))
}

/// Delete a chapter
#[utoipa::path(
    delete,
    path = "/chapters/{id}",
    tag = "chapters",
    params(("id" = i32, Path, description = "Chapter ID")),
    responses(
        (status = 204, description = "Chapter deleted"),
        (status = 404, description = "Chapter not found in the current book")
    )
)]
pub async fn delete_chapter(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let scope = state.services.current_book.scope(&session).await;
    state.services.chapters.delete(&scope, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
