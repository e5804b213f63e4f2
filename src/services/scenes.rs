//! Scene write policy: chapter, place and participants must share the
//! scene's book

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{
        scene::{CreateScene, SceneLinks, UpdateScene},
        Chapter, Character, Place, Scene,
    },
    repository::Repository,
    scope::BookId,
    services::scoped::{ensure_in_book, ensure_movable, BookScopedStore},
};

async fn check_links(repository: &Repository, book: BookId, links: &SceneLinks) -> AppResult<()> {
    if let Some(chapter) = links.chapter {
        ensure_in_book::<Chapter>(repository, "chapter", book, &[chapter]).await?;
    }
    if let Some(place) = links.place {
        ensure_in_book::<Place>(repository, "place", book, &[place]).await?;
    }
    ensure_in_book::<Character>(repository, "characters", book, &links.characters).await
}

#[async_trait]
impl BookScopedStore for Scene {
    type Create = CreateScene;
    type Update = UpdateScene;
    const REFERENCED_BY: &'static [(&'static str, &'static str)] =
        &[("inventory_exchanges", "scene_id")];

    fn book(&self) -> BookId {
        self.book
    }

    async fn insert(repository: &Repository, book: BookId, data: &CreateScene) -> AppResult<i32> {
        repository.scenes.create(book, data).await
    }

    async fn modify(repository: &Repository, id: i32, data: UpdateScene) -> AppResult<()> {
        repository.scenes.update(id, data).await
    }

    async fn check_create(repository: &Repository, book: BookId, data: &CreateScene) -> AppResult<()> {
        check_links(repository, book, &SceneLinks::from(data)).await
    }

    async fn check_update(
        repository: &Repository,
        existing: &Scene,
        book: BookId,
        data: &UpdateScene,
    ) -> AppResult<()> {
        // exchanges of the scene reference props and characters of its book
        ensure_movable(repository, existing, book).await?;
        check_links(repository, book, &SceneLinks::merged(existing, data)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_with_exchanges_is_pinned_to_its_book() {
        assert_eq!(Scene::REFERENCED_BY, &[("inventory_exchanges", "scene_id")]);
    }
}
