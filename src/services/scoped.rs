//! Book-scoped resource controller
//!
//! Lists and lookups are filtered to the current book; creates and updates
//! have the current book forced onto them before they are written.

use std::marker::PhantomData;

use async_trait::async_trait;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        chapter::{CreateChapter, UpdateChapter},
        character::{CreateCharacter, UpdateCharacter},
        place::{CreatePlace, UpdatePlace},
        prop::{CreateProp, UpdateProp},
        Chapter, Character, ListQuery, Place, Prop,
    },
    repository::Repository,
    scope::{BookId, BookScopedWrite, Resource, ScopeContext},
};

/// Write side of a resource owned by a book
#[async_trait]
pub trait BookScopedStore: Resource + Sync {
    type Create: BookScopedWrite + Validate + Send + Sync;
    type Update: BookScopedWrite + Validate + Send + Sync;

    /// `(table, column)` pairs of other rows pointing at this resource.
    /// A referenced row cannot move to another book.
    const REFERENCED_BY: &'static [(&'static str, &'static str)] = &[];

    fn book(&self) -> BookId;

    /// Insert into `book`, returning the new id
    async fn insert(repository: &Repository, book: BookId, data: &Self::Create) -> AppResult<i32>;

    async fn modify(repository: &Repository, id: i32, data: Self::Update) -> AppResult<()>;

    /// Check references of a new row against its book
    async fn check_create(
        _repository: &Repository,
        _book: BookId,
        _data: &Self::Create,
    ) -> AppResult<()> {
        Ok(())
    }

    /// Check references of an updated row against its final book
    async fn check_update(
        repository: &Repository,
        existing: &Self,
        book: BookId,
        _data: &Self::Update,
    ) -> AppResult<()> {
        ensure_movable(repository, existing, book).await
    }
}

/// Validation error for a reference to a row that does not exist
pub fn missing_reference(field: &str, id: i32) -> AppError {
    AppError::Validation(format!(
        "{}: Invalid pk \"{}\" - object does not exist.",
        field, id
    ))
}

/// Book a new row is written to. Either the current book was applied to
/// the payload, or the client named one; otherwise the field is missing.
async fn require_book(repository: &Repository, book: Option<BookId>) -> AppResult<BookId> {
    let book = book.ok_or_else(|| AppError::Validation("book: This field is required.".to_string()))?;
    ensure_book(repository, book).await?;
    Ok(book)
}

async fn ensure_book(repository: &Repository, book: BookId) -> AppResult<()> {
    repository
        .books
        .find(book)
        .await?
        .map(|_| ())
        .ok_or_else(|| missing_reference("book", book))
}

/// Verify every id in `ids` exists in `owners` and belongs to `book`
pub fn check_owners<R: Resource>(
    field: &str,
    book: BookId,
    ids: &[i32],
    owners: &[(i32, BookId)],
) -> AppResult<()> {
    for id in ids {
        match owners.iter().find(|(owned, _)| owned == id) {
            None => return Err(missing_reference(field, *id)),
            Some((_, owner)) if *owner != book => {
                return Err(AppError::Validation(format!(
                    "{}: {} {} belongs to another book",
                    field,
                    R::NAME,
                    id
                )));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Load owners of `ids` and run [`check_owners`]
pub async fn ensure_in_book<R: Resource>(
    repository: &Repository,
    field: &str,
    book: BookId,
    ids: &[i32],
) -> AppResult<()> {
    let owners = repository.resources.books_of::<R>(ids).await?;
    check_owners::<R>(field, book, ids, &owners)
}

/// Reject moving row `id` out of `from` while `references` rows still
/// point at it
pub fn check_move<R: Resource>(id: i32, from: BookId, to: BookId, references: i64) -> AppResult<()> {
    if from != to && references > 0 {
        return Err(AppError::Validation(format!(
            "book: {} {} is still referenced in book {}",
            R::NAME,
            id,
            from
        )));
    }
    Ok(())
}

/// Load the references of `existing` and run [`check_move`]
pub async fn ensure_movable<R: BookScopedStore>(
    repository: &Repository,
    existing: &R,
    book: BookId,
) -> AppResult<()> {
    if existing.book() == book || R::REFERENCED_BY.is_empty() {
        return Ok(());
    }
    let references = repository
        .resources
        .count_references(R::REFERENCED_BY, existing.id())
        .await?;
    check_move::<R>(existing.id(), existing.book(), book, references)
}

pub struct ScopedService<R> {
    repository: Repository,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ScopedService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: BookScopedStore> ScopedService<R> {
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            _resource: PhantomData,
        }
    }

    pub async fn list(&self, scope: &ScopeContext, query: &ListQuery) -> AppResult<(Vec<R>, i64)> {
        self.repository
            .resources
            .list::<R>(scope.filter_for::<R>(), &query.ids, query.page())
            .await
    }

    pub async fn get(&self, scope: &ScopeContext, id: i32) -> AppResult<R> {
        self.repository.resources.get::<R>(scope.filter_for::<R>(), id).await
    }

    pub async fn create(&self, scope: &ScopeContext, mut data: R::Create) -> AppResult<R> {
        data.validate()?;
        scope.apply(&mut data);
        let book = require_book(&self.repository, *data.book_mut()).await?;
        R::check_create(&self.repository, book, &data).await?;

        let id = R::insert(&self.repository, book, &data).await?;
        tracing::info!(id, book_id = book, "{} created", R::NAME);

        self.repository.resources.get::<R>(None, id).await
    }

    /// Update a row visible in `scope`. The current book, when set, replaces
    /// whatever book the client sent.
    pub async fn update(&self, scope: &ScopeContext, id: i32, mut data: R::Update) -> AppResult<R> {
        data.validate()?;
        let existing = self.get(scope, id).await?;

        scope.apply(&mut data);
        let book = match *data.book_mut() {
            Some(book) => {
                ensure_book(&self.repository, book).await?;
                book
            }
            None => existing.book(),
        };
        R::check_update(&self.repository, &existing, book, &data).await?;

        R::modify(&self.repository, id, data).await?;
        tracing::info!(id, book_id = book, "{} updated", R::NAME);

        self.repository.resources.get::<R>(None, id).await
    }

    pub async fn delete(&self, scope: &ScopeContext, id: i32) -> AppResult<()> {
        self.repository
            .resources
            .delete::<R>(scope.filter_for::<R>(), id)
            .await?;
        tracing::info!(id, "{} deleted", R::NAME);
        Ok(())
    }
}

#[async_trait]
impl BookScopedStore for Chapter {
    type Create = CreateChapter;
    type Update = UpdateChapter;
    const REFERENCED_BY: &'static [(&'static str, &'static str)] = &[("scenes", "chapter_id")];

    fn book(&self) -> BookId {
        self.book
    }

    async fn insert(repository: &Repository, book: BookId, data: &CreateChapter) -> AppResult<i32> {
        repository.chapters.create(book, data).await
    }

    async fn modify(repository: &Repository, id: i32, data: UpdateChapter) -> AppResult<()> {
        repository.chapters.update(id, data).await
    }
}

#[async_trait]
impl BookScopedStore for Place {
    type Create = CreatePlace;
    type Update = UpdatePlace;
    const REFERENCED_BY: &'static [(&'static str, &'static str)] = &[("scenes", "place_id")];

    fn book(&self) -> BookId {
        self.book
    }

    async fn insert(repository: &Repository, book: BookId, data: &CreatePlace) -> AppResult<i32> {
        repository.places.create(book, data).await
    }

    async fn modify(repository: &Repository, id: i32, data: UpdatePlace) -> AppResult<()> {
        repository.places.update(id, data).await
    }
}

#[async_trait]
impl BookScopedStore for Prop {
    type Create = CreateProp;
    type Update = UpdateProp;
    const REFERENCED_BY: &'static [(&'static str, &'static str)] = &[("inventory_exchanges", "prop_id")];

    fn book(&self) -> BookId {
        self.book
    }

    async fn insert(repository: &Repository, book: BookId, data: &CreateProp) -> AppResult<i32> {
        repository.props.create(book, data).await
    }

    async fn modify(repository: &Repository, id: i32, data: UpdateProp) -> AppResult<()> {
        repository.props.update(id, data).await
    }
}

#[async_trait]
impl BookScopedStore for Character {
    type Create = CreateCharacter;
    type Update = UpdateCharacter;
    const REFERENCED_BY: &'static [(&'static str, &'static str)] = &[
        ("scene_characters", "character_id"),
        ("inventory_exchanges", "from_char_id"),
        ("inventory_exchanges", "to_char_id"),
    ];

    fn book(&self) -> BookId {
        self.book
    }

    async fn insert(repository: &Repository, book: BookId, data: &CreateCharacter) -> AppResult<i32> {
        repository.characters.create(book, data).await
    }

    async fn modify(repository: &Repository, id: i32, data: UpdateCharacter) -> AppResult<()> {
        repository.characters.update(id, data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owners_in_same_book_pass() {
        let owners = [(1, 10), (2, 10)];
        assert!(check_owners::<Character>("characters", 10, &[1, 2], &owners).is_ok());
    }

    #[test]
    fn test_unknown_reference_is_rejected() {
        let err = check_owners::<Place>("place", 10, &[3], &[]).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("Invalid pk \"3\"")));
    }

    #[test]
    fn test_reference_from_other_book_is_rejected() {
        let owners = [(1, 10), (2, 11)];
        let err = check_owners::<Character>("characters", 10, &[1, 2], &owners).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("Character 2 belongs to another book")));
    }

    #[test]
    fn test_referenced_row_cannot_change_book() {
        let err = check_move::<Place>(4, 10, 11, 2).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("Place 4 is still referenced in book 10")));
    }

    #[test]
    fn test_unreferenced_row_can_change_book() {
        assert!(check_move::<Chapter>(4, 10, 11, 0).is_ok());
    }

    #[test]
    fn test_referenced_row_can_stay_in_its_book() {
        assert!(check_move::<Character>(4, 10, 10, 3).is_ok());
    }

    #[test]
    fn test_references_cover_every_pointer_column() {
        assert_eq!(Chapter::REFERENCED_BY, &[("scenes", "chapter_id")]);
        assert_eq!(Place::REFERENCED_BY, &[("scenes", "place_id")]);
        assert_eq!(Prop::REFERENCED_BY, &[("inventory_exchanges", "prop_id")]);
        assert_eq!(Character::REFERENCED_BY.len(), 3);
        assert!(Character::REFERENCED_BY.contains(&("inventory_exchanges", "from_char_id")));
    }

    #[test]
    fn test_no_references_pass() {
        assert!(check_owners::<Chapter>("chapter", 10, &[], &[]).is_ok());
    }
}
