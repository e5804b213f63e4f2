//! Characters API endpoints
//!
//! Characters appear in scenes and trade props.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Query;

use crate::{
    error::AppResult,
    models::{
        character::{CreateCharacter, UpdateCharacter},
        Character, ListQuery,
    },
};

use super::{AuthenticatedSession, PaginatedResponse};

/// List characters of the current book
#[utoipa::path(
    get,
    path = "/characters",
    tag = "characters",
    params(ListQuery),
    responses(
        (status = 200, description = "Characters list", body = PaginatedResponse<Character>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_characters(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<PaginatedResponse<Character>>> {
    let scope = state.services.current_book.scope(&session).await;
    let (characters, total) = state.services.characters.list(&scope, &query).await?;
    Ok(Json(PaginatedResponse::new(characters, total, query.page())))
}

/// Get a character by ID
#[utoipa::path(
    get,
    path = "/characters/{id}",
    tag = "characters",
    params(("id" = i32, Path, description = "Character ID")),
    responses(
        (status = 200, description = "Character details", body = Character),
        (status = 404, description = "Character not found in the current book")
    )
)]
pub async fn get_character(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(id): Path<i32>,
) -> AppResult<Json<Character>> {
    let scope = state.services.current_book.scope(&session).await;
    let character = state.services.characters.get(&scope, id).await?;
    Ok(Json(character))
}

/// Create a character in the current book
#[utoipa::path(
    post,
    path = "/characters",
    tag = "characters",
    request_body = CreateCharacter,
    responses(
        (status = 201, description = "Character created", body = Character),
        (status = 400, description = "Invalid data or no book")
    )
)]
pub async fn create_character(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Json(data): Json<CreateCharacter>,
) -> AppResult<(StatusCode, Json<Character>)> {
    let scope = state.services.current_book.scope(&session).await;
    let character = state.services.characters.create(&scope, data).await?;
    Ok((StatusCode::CREATED, Json(character)))
}

/// Update a character
#[utoipa::path(
    put,
    path = "/characters/{id}",
    tag = "characters",
    params(("id" = i32, Path, description = "Character ID")),
    request_body = UpdateCharacter,
    responses(
        (status = 200, description = "Character updated", body = Character),
        (status = 404, description = "Character not found in the current book")
    )
)]
pub async fn update_character(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(id): Path<i32>,
    Json(data): Json<UpdateCharacter>,
) -> AppResult<Json<Character>> {
    let scope = state.services.current_book.scope(&session).await;
    let character = state.services.characters.update(&scope, id, data).await?;
    Ok(Json(character))
}

/// Delete a character
#[utoipa::path(
    delete,
    path = "/characters/{id}",
    tag = "characters",
    params(("id" = i32, Path, description = "Character ID")),
    responses(
        (status = 204, description = "Character deleted"),
        (status = 404, description = "Character not found in the current book")
    )
)]
pub async fn delete_character(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let scope = state.services.current_book.scope(&session).await;
    state.services.characters.delete(&scope, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
