//! Scenes API endpoints
//!
//! Scene references (chapter, place, characters) must belong to the
//! scene's book.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Query;

use crate::{
    error::AppResult,
    models::{
        scene::{CreateScene, UpdateScene},
        ListQuery, Scene,
    },
};

use super::{AuthenticatedSession, PaginatedResponse};

/// List scenes of the current book
#[utoipa::path(
    get,
    path = "/scenes",
    tag = "scenes",
    params(ListQuery),
    responses(
        (status = 200, description = "Scenes list", body = PaginatedResponse<Scene>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_scenes(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<PaginatedResponse<Scene>>> {
    let scope = state.services.current_book.scope(&session).await;
    let (scenes, total) = state.services.scenes.list(&scope, &query).await?;
    Ok(Json(PaginatedResponse::new(scenes, total, query.page())))
}

/// Get a scene by ID
#[utoipa::path(
    get,
    path = "/scenes/{id}",
    tag = "scenes",
    params(("id" = i32, Path, description = "Scene ID")),
    responses(
        (status = 200, description = "Scene details", body = Scene),
        (status = 404, description = "Scene not found in the current book")
    )
)]
pub async fn get_scene(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(id): Path<i32>,
) -> AppResult<Json<Scene>> {
    let scope = state.services.current_book.scope(&session).await;
    let scene = state.services.scenes.get(&scope, id).await?;
    Ok(Json(scene))
}

/// Create a scene in the current book
#[utoipa::path(
    post,
    path = "/scenes",
    tag = "scenes",
    request_body = CreateScene,
    responses(
        (status = 201, description = "Scene created", body = Scene),
        (status = 400, description = "Invalid data or no book")
    )
)]
pub async fn create_scene(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Json(data): Json<CreateScene>,
) -> AppResult<(StatusCode, Json<Scene>)> {
    let scope = state.services.current_book.scope(&session).await;
    let scene = state.services.scenes.create(&scope, data).await?;
    Ok((StatusCode::CREATED, Json(scene)))
}

/// Update a scene
#[utoipa::path(
    put,
    path = "/scenes/{id}",
    tag = "scenes",
    params(("id" = i32, Path, description = "Scene ID")),
    request_body = UpdateScene,
    responses(
        (status = 200, description = "Scene updated", body = Scene),
        (status = 404, description = "Scene not found in the current book")
    )
)]
pub async fn update_scene(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(id): Path<i32>,
    Json(data): Json<UpdateScene>,
) -> AppResult<Json<Scene>> {
    let scope = state.services.current_book.scope(&session).await;
    let scene = state.services.scenes.update(&scope, id, data).await?;
    Ok(Json(scene))
}

/// Delete a scene
#[utoipa::path(
    delete,
    path = "/scenes/{id}",
    tag = "scenes",
    params(("id" = i32, Path, description = "Scene ID")),
    responses(
        (status = 204, description = "Scene deleted"),
        (status = 404, description = "Scene not found in the current book")
    )
)]
pub async fn delete_scene(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let scope = state.services.current_book.scope(&session).await;
    state.services.scenes.delete(&scope, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
