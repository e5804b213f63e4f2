//! Props API endpoints
//!
//! Objects that change hands through inventory exchanges.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Query;

use crate::{
    error::AppResult,
    models::{
        prop::{CreateProp, UpdateProp},
        ListQuery, Prop,
    },
};

use super::{AuthenticatedSession, PaginatedResponse};

/// List props of the current book
#[utoipa::path(
    get,
    path = "/props",
    tag = "props",
    params(ListQuery),
    responses(
        (status = 200, description = "Props list", body = PaginatedResponse<Prop>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_props(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<PaginatedResponse<Prop>>> {
    let scope = state.services.current_book.scope(&session).await;
    let (props, total) = state.services.props.list(&scope, &query).await?;
    Ok(Json(PaginatedResponse::new(props, total, query.page())))
}

/// Get a prop by ID
#[utoipa::path(
    get,
    path = "/props/{id}",
    tag = "props",
    params(("id" = i32, Path, description = "Prop ID")),
    responses(
        (status = 200, description = "Prop details", body = Prop),
        (status = 404, description = "Prop not found in the current book")
    )
)]
pub async fn get_prop(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(id): Path<i32>,
) -> AppResult<Json<Prop>> {
    let scope = state.services.current_book.scope(&session).await;
    let prop = state.services.props.get(&scope, id).await?;
    Ok(Json(prop))
}

/// Create a prop in the current book
#[utoipa::path(
    post,
    path = "/props",
    tag = "props",
    request_body = CreateProp,
    responses(
        (status = 201, description = "Prop created", body = Prop),
        (status = 400, description = "Invalid data or no book")
    )
)]
pub async fn create_prop(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Json(data): Json<CreateProp>,
) -> AppResult<(StatusCode, Json<Prop>)> {
    let scope = state.services.current_book.scope(&session).await;
    let prop = state.services.props.create(&scope, data).await?;
    Ok((StatusCode::CREATED, Json(prop)))
}

/// Update a prop
#[utoipa::path(
    put,
    path = "/props/{id}",
    tag = "props",
    params(("id" = i32, Path, description = "Prop ID")),
    request_body = UpdateProp,
    responses(
        (status = 200, description = "Prop updated", body = Prop),
        (status = 404, description = "Prop not found in the current book")
    )
)]
pub async fn update_prop(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(id): Path<i32>,
    Json(data): Json<UpdateProp>,
) -> AppResult<Json<Prop>> {
    let scope = state.services.current_book.scope(&session).await;
    let prop = state.services.props.update(&scope, id, data).await?;
    Ok(Json(prop))
}

/// Delete a prop
#[utoipa::path(
    delete,
    path = "/props/{id}",
    tag = "props",
    params(("id" = i32, Path, description = "Prop ID")),
    responses(
        (status = 204, description = "Prop deleted"),
        (status = 404, description = "Prop not found in the current book")
    )
)]
pub async fn delete_prop(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let scope = state.services.current_book.scope(&session).await;
    state.services.props.delete(&scope, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
