//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    auth, books, chapters, characters, exchanges, health, places, props, scenes, users,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "NaNoWriMo API",
        version = "1.0.0",
        description = "Novel planning REST API. Chapters, places, props, characters and scenes are scoped to the session's current book."
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::logout,
        auth::me,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::current_book,
        // Chapters
        chapters::list_chapters,
        chapters::get_chapter,
        chapters::create_chapter,
        chapters::update_chapter,
        chapters::delete_chapter,
        // Places
        places::list_places,
        places::get_place,
        places::create_place,
        places::update_place,
        places::delete_place,
        // Props
        props::list_props,
        props::get_prop,
        props::create_prop,
        props::update_prop,
        props::delete_prop,
        // Characters
        characters::list_characters,
        characters::get_character,
        characters::create_character,
        characters::update_character,
        characters::delete_character,
        // Scenes
        scenes::list_scenes,
        scenes::get_scene,
        scenes::create_scene,
        scenes::update_scene,
        scenes::delete_scene,
        // Inventory exchanges
        exchanges::list_exchanges,
        exchanges::get_exchange,
        exchanges::create_exchange,
        exchanges::update_exchange,
        exchanges::delete_exchange,
    ),
    components(
        schemas(
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            crate::models::user::LoginRequest,
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Book contents
            crate::models::chapter::Chapter,
            crate::models::chapter::CreateChapter,
            crate::models::chapter::UpdateChapter,
            crate::models::place::Place,
            crate::models::place::CreatePlace,
            crate::models::place::UpdatePlace,
            crate::models::prop::Prop,
            crate::models::prop::CreateProp,
            crate::models::prop::UpdateProp,
            crate::models::character::Character,
            crate::models::character::CreateCharacter,
            crate::models::character::UpdateCharacter,
            crate::models::scene::Scene,
            crate::models::scene::CreateScene,
            crate::models::scene::UpdateScene,
            crate::models::exchange::InventoryExchange,
            crate::models::exchange::CreateExchange,
            crate::models::exchange::UpdateExchange,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Session login and logout"),
        (name = "users", description = "User management"),
        (name = "books", description = "Books and the current-book pointer"),
        (name = "chapters", description = "Chapters of the current book"),
        (name = "places", description = "Places of the current book"),
        (name = "props", description = "Props of the current book"),
        (name = "characters", description = "Characters of the current book"),
        (name = "scenes", description = "Scenes of the current book"),
        (name = "inventory-exchanges", description = "Props changing hands in scenes")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
