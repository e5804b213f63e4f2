//! Inventory exchanges service
//!
//! Exchanges have no `book` column, so the current-book filter and the
//! book injection on writes do not apply to them. Their references are
//! still checked against the book of their scene.

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        exchange::{CreateExchange, ExchangeLinks, UpdateExchange},
        Character, InventoryExchange, ListQuery, Prop,
    },
    repository::Repository,
    scope::ScopeContext,
    services::scoped::{ensure_in_book, missing_reference},
};

#[derive(Clone)]
pub struct ExchangesService {
    repository: Repository,
}

impl ExchangesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    async fn check_links(&self, links: &ExchangeLinks) -> AppResult<()> {
        let book = self
            .repository
            .exchanges
            .book_of_scene(links.scene)
            .await?
            .ok_or_else(|| missing_reference("scene", links.scene))?;

        ensure_in_book::<Prop>(&self.repository, "prop", book, &[links.prop]).await?;
        if let Some(from) = links.from_char {
            ensure_in_book::<Character>(&self.repository, "from_char", book, &[from]).await?;
        }
        if let Some(to) = links.to_char {
            ensure_in_book::<Character>(&self.repository, "to_char", book, &[to]).await?;
        }
        Ok(())
    }

    pub async fn list(
        &self,
        scope: &ScopeContext,
        query: &ListQuery,
    ) -> AppResult<(Vec<InventoryExchange>, i64)> {
        self.repository
            .resources
            .list::<InventoryExchange>(scope.filter_for::<InventoryExchange>(), &query.ids, query.page())
            .await
    }

    pub async fn get(&self, scope: &ScopeContext, id: i32) -> AppResult<InventoryExchange> {
        self.repository
            .resources
            .get::<InventoryExchange>(scope.filter_for::<InventoryExchange>(), id)
            .await
    }

    pub async fn create(&self, data: CreateExchange) -> AppResult<InventoryExchange> {
        data.validate()?;
        self.check_links(&ExchangeLinks::from(&data)).await?;

        let id = self.repository.exchanges.create(&data).await?;
        tracing::info!(id, scene_id = data.scene, "InventoryExchange created");

        self.repository.resources.get::<InventoryExchange>(None, id).await
    }

    pub async fn update(
        &self,
        scope: &ScopeContext,
        id: i32,
        data: UpdateExchange,
    ) -> AppResult<InventoryExchange> {
        data.validate()?;
        let existing = self.get(scope, id).await?;
        self.check_links(&ExchangeLinks::merged(&existing, &data)).await?;

        self.repository.exchanges.update(id, data).await?;
        tracing::info!(id, "InventoryExchange updated");

        self.repository.resources.get::<InventoryExchange>(None, id).await
    }

    pub async fn delete(&self, scope: &ScopeContext, id: i32) -> AppResult<()> {
        self.repository
            .resources
            .delete::<InventoryExchange>(scope.filter_for::<InventoryExchange>(), id)
            .await?;
        tracing::info!(id, "InventoryExchange deleted");
        Ok(())
    }
}
