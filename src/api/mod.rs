//! API handlers for the NaNoWriMo REST endpoints

pub mod auth;
pub mod books;
pub mod chapters;
pub mod characters;
pub mod exchanges;
pub mod health;
pub mod openapi;
pub mod places;
pub mod props;
pub mod scenes;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::{
    error::AppError,
    models::Page,
    services::sessions::Session,
    AppState,
};

/// Extractor for the session named by the session cookie
pub struct AuthenticatedSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session_id = jar
            .get(&state.config.sessions.cookie_name)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| {
                AppError::Authentication("Authentication credentials were not provided".to_string())
            })?;

        let session = state
            .services
            .auth
            .session(&session_id)
            .await?
            .ok_or_else(|| AppError::Authentication("Session expired or invalid".to_string()))?;

        Ok(AuthenticatedSession(session))
    }
}

/// Paginated response wrapper
#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Rows of the requested page
    pub items: Vec<T>,
    /// Total number of matching rows
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Rows per page; equals `total` when pagination is off
    pub per_page: i64,
}

impl<T> PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub fn new(items: Vec<T>, total: i64, page: Page) -> Self {
        let (page, per_page) = page.report(total);
        Self {
            items,
            total,
            page,
            per_page,
        }
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/session/current-book", get(books::current_book))
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .patch(books::update_book)
                .delete(books::delete_book),
        )
        // Book-scoped resources
        .route("/chapters", get(chapters::list_chapters).post(chapters::create_chapter))
        .route(
            "/chapters/:id",
            get(chapters::get_chapter)
                .put(chapters::update_chapter)
                .patch(chapters::update_chapter)
                .delete(chapters::delete_chapter),
        )
        .route("/places", get(places::list_places).post(places::create_place))
        .route(
            "/places/:id",
            get(places::get_place)
                .put(places::update_place)
                .patch(places::update_place)
                .delete(places::delete_place),
        )
        .route("/props", get(props::list_props).post(props::create_prop))
        .route(
            "/props/:id",
            get(props::get_prop)
                .put(props::update_prop)
                .patch(props::update_prop)
                .delete(props::delete_prop),
        )
        .route(
            "/characters",
            get(characters::list_characters).post(characters::create_character),
        )
        .route(
            "/characters/:id",
            get(characters::get_character)
                .put(characters::update_character)
                .patch(characters::update_character)
                .delete(characters::delete_character),
        )
        .route("/scenes", get(scenes::list_scenes).post(scenes::create_scene))
        .route(
            "/scenes/:id",
            get(scenes::get_scene)
                .put(scenes::update_scene)
                .patch(scenes::update_scene)
                .delete(scenes::delete_scene),
        )
        .route(
            "/inventory-exchanges",
            get(exchanges::list_exchanges).post(exchanges::create_exchange),
        )
        .route(
            "/inventory-exchanges/:id",
            get(exchanges::get_exchange)
                .put(exchanges::update_exchange)
                .patch(exchanges::update_exchange)
                .delete(exchanges::delete_exchange),
        )
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
