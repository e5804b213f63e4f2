//! Places API endpoints
//!
//! Locations where scenes happen.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Query;

use crate::{
    error::AppResult,
    models::{
        place::{CreatePlace, UpdatePlace},
        ListQuery, Place,
    },
};

use super::{AuthenticatedSession, PaginatedResponse};

/// List places of the current book
#[utoipa::path(
    get,
    path = "/places",
    tag = "places",
    params(ListQuery),
    responses(
        (status = 200, description = "Places list", body = PaginatedResponse<Place>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_places(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<PaginatedResponse<Place>>> {
    let scope = state.services.current_book.scope(&session).await;
    let (places, total) = state.services.places.list(&scope, &query).await?;
    Ok(Json(PaginatedResponse::new(places, total, query.page())))
}

/// Get a place by ID
#[utoipa::path(
    get,
    path = "/places/{id}",
    tag = "places",
    params(("id" = i32, Path, description = "Place ID")),
    responses(
        (status = 200, description = "Place details", body = Place),
        (status = 404, description = "Place not found in the current book")
    )
)]
pub async fn get_place(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(id): Path<i32>,
) -> AppResult<Json<Place>> {
    let scope = state.services.current_book.scope(&session).await;
    let place = state.services.places.get(&scope, id).await?;
    Ok(Json(place))
}

/// Create a place in the current book
#[utoipa::path(
    post,
    path = "/places",
    tag = "places",
    request_body = CreatePlace,
    responses(
        (status = 201, description = "Place created", body = Place),
        (status = 400, description = "Invalid data or no book")
    )
)]
pub async fn create_place(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Json(data): Json<CreatePlace>,
) -> AppResult<(StatusCode, Json<Place>)> {
    let scope = state.services.current_book.scope(&session).await;
    let place = state.services.places.create(&scope, data).await?;
    Ok((StatusCode::CREATED, Json(place)))
}

/// Update a place
#[utoipa::path(
    put,
    path = "/places/{id}",
    tag = "places",
    params(("id" = i32, Path, description = "Place ID")),
    request_body = UpdatePlace,
    responses(
        (status = 200, description = "Place updated", body = Place),
        (status = 404, description = "Place not found in the current book")
    )
)]
pub async fn update_place(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(id): Path<i32>,
    Json(data): Json<UpdatePlace>,
) -> AppResult<Json<Place>> {
    let scope = state.services.current_book.scope(&session).await;
    let place = state.services.places.update(&scope, id, data).await?;
    Ok(Json(place))
}

/// Delete a place
#[utoipa::path(
    delete,
    path = "/places/{id}",
    tag = "places",
    params(("id" = i32, Path, description = "Place ID")),
    responses(
        (status = 204, description = "Place deleted"),
        (status = 404, description = "Place not found in the current book")
    )
)]
pub async fn delete_place(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let scope = state.services.current_book.scope(&session).await;
    state.services.places.delete(&scope, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
