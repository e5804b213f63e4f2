//! Inventory exchange API endpoints
//!
//! Exchanges hang off a scene and carry no book of their own, so the
//! current book neither filters them nor gets written onto them.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Query;

use crate::{
    error::AppResult,
    models::{
        exchange::{CreateExchange, UpdateExchange},
        InventoryExchange, ListQuery,
    },
};

use super::{AuthenticatedSession, PaginatedResponse};

/// List inventory exchanges
#[utoipa::path(
    get,
    path = "/inventory-exchanges",
    tag = "inventory-exchanges",
    params(ListQuery),
    responses(
        (status = 200, description = "Inventory exchange list", body = PaginatedResponse<InventoryExchange>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_exchanges(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<PaginatedResponse<InventoryExchange>>> {
    let scope = state.services.current_book.scope(&session).await;
    let (exchanges, total) = state.services.exchanges.list(&scope, &query).await?;
    Ok(Json(PaginatedResponse::new(exchanges, total, query.page())))
}

/// Get an inventory exchange by ID
#[utoipa::path(
    get,
    path = "/inventory-exchanges/{id}",
    tag = "inventory-exchanges",
    params(("id" = i32, Path, description = "Inventory exchange ID")),
    responses(
        (status = 200, description = "Inventory exchange details", body = InventoryExchange),
        (status = 404, description = "Inventory exchange not found")
    )
)]
pub async fn get_exchange(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(id): Path<i32>,
) -> AppResult<Json<InventoryExchange>> {
    let scope = state.services.current_book.scope(&session).await;
    let exchange = state.services.exchanges.get(&scope, id).await?;
    Ok(Json(exchange))
}

/// Record an inventory exchange
#[utoipa::path(
    post,
    path = "/inventory-exchanges",
    tag = "inventory-exchanges",
    request_body = CreateExchange,
    responses(
        (status = 201, description = "Inventory exchange created", body = InventoryExchange),
        (status = 400, description = "Invalid data or references from another book")
    )
)]
pub async fn create_exchange(
    State(state): State<crate::AppState>,
    AuthenticatedSession(_session): AuthenticatedSession,
    Json(data): Json<CreateExchange>,
) -> AppResult<(StatusCode, Json<InventoryExchange>)> {
    let exchange = state.services.exchanges.create(data).await?;
    Ok((StatusCode::CREATED, Json(exchange)))
}

/// Update an inventory exchange
#[utoipa::path(
    put,
    path = "/inventory-exchanges/{id}",
    tag = "inventory-exchanges",
    params(("id" = i32, Path, description = "Inventory exchange ID")),
    request_body = UpdateExchange,
    responses(
        (status = 200, description = "Inventory exchange updated", body = InventoryExchange),
        (status = 404, description = "Inventory exchange not found")
    )
)]
pub async fn update_exchange(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(id): Path<i32>,
    Json(data): Json<UpdateExchange>,
) -> AppResult<Json<InventoryExchange>> {
    let scope = state.services.current_book.scope(&session).await;
    let exchange = state.services.exchanges.update(&scope, id, data).await?;
    Ok(Json(exchange))
}

/// Delete an inventory exchange
#[utoipa::path(
    delete,
    path = "/inventory-exchanges/{id}",
    tag = "inventory-exchanges",
    params(("id" = i32, Path, description = "Inventory exchange ID")),
    responses(
        (status = 204, description = "Inventory exchange deleted"),
        (status = 404, description = "Inventory exchange not found")
    )
)]
pub async fn delete_exchange(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let scope = state.services.current_book.scope(&session).await;
    state.services.exchanges.delete(&scope, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
