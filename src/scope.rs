//! Current-book scoping
//!
//! Every book-related resource is filtered and defaulted by the book the
//! session currently points at. The pointer is resolved once per request
//! into a [`ScopeContext`] which is then handed explicitly to every
//! service call.

use std::fmt::Display;

use sqlx::{postgres::PgRow, FromRow};

/// Identifier of a [`Book`](crate::models::Book)
pub type BookId = i32;

/// Column a resource is scoped by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeColumn {
    /// The resource has a `book_id` column and is filtered by it
    Book,
    /// The resource carries no `book_id` column; scoping is a no-op.
    /// Books themselves, and inventory exchanges which hang off a scene.
    Unscoped,
}

/// Resolved scope for a single request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeContext {
    pub current_book: Option<BookId>,
}

impl ScopeContext {
    pub fn new(current_book: Option<BookId>) -> Self {
        Self { current_book }
    }

    /// Scope with no current book: lists span every book
    pub fn unscoped() -> Self {
        Self::default()
    }

    /// Book filter to apply to queries on `R`, if any
    pub fn filter_for<R: Resource>(&self) -> Option<BookId> {
        match R::SCOPE_COLUMN {
            ScopeColumn::Book => self.current_book,
            ScopeColumn::Unscoped => None,
        }
    }

    /// Force the current book onto a create or update payload.
    ///
    /// Without a current book the payload keeps whatever book the client
    /// sent (possibly none).
    pub fn apply<W: BookScopedWrite>(&self, write: &mut W) {
        if let Some(book) = self.current_book {
            *write.book_mut() = Some(book);
        }
    }
}

/// A stored entity exposed through the CRUD endpoints
pub trait Resource: for<'r> FromRow<'r, PgRow> + Display + Send + Unpin + 'static {
    /// Human name used in error messages
    const NAME: &'static str;
    /// Table written to (and deleted from)
    const TABLE: &'static str;
    /// Relation read from; a view when the resource has derived columns
    const SOURCE: &'static str;
    /// Default ordering of list results
    const ORDER_BY: &'static str;
    const SCOPE_COLUMN: ScopeColumn;

    fn id(&self) -> i32;

    fn label_mut(&mut self) -> &mut String;

    /// Fill the read-only display label from the entity's `Display`
    fn labelled(mut self) -> Self
    where
        Self: Sized,
    {
        *self.label_mut() = self.to_string();
        self
    }
}

/// A create or update payload that carries a `book` reference
pub trait BookScopedWrite {
    fn book_mut(&mut self) -> &mut Option<BookId>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        chapter::{Chapter, CreateChapter},
        exchange::InventoryExchange,
        place::{Place, UpdatePlace},
    };

    #[test]
    fn test_filter_uses_current_book_for_book_scoped_resources() {
        let scope = ScopeContext::new(Some(7));
        assert_eq!(scope.filter_for::<Chapter>(), Some(7));
        assert_eq!(scope.filter_for::<Place>(), Some(7));
    }

    #[test]
    fn test_no_current_book_adds_no_filter() {
        let scope = ScopeContext::unscoped();
        assert_eq!(scope.filter_for::<Chapter>(), None);
    }

    #[test]
    fn test_exchanges_ignore_current_book() {
        let scope = ScopeContext::new(Some(7));
        assert_eq!(scope.filter_for::<InventoryExchange>(), None);
    }

    #[test]
    fn test_apply_sets_book_on_create_without_book() {
        let mut data = CreateChapter {
            book: None,
            number: Some(1),
            title: None,
            summary: None,
        };
        ScopeContext::new(Some(3)).apply(&mut data);
        assert_eq!(data.book, Some(3));
    }

    #[test]
    fn test_apply_overrides_client_book_on_update() {
        let mut data = UpdatePlace {
            book: Some(99),
            name: Some("Harbour".into()),
            description: None,
        };
        ScopeContext::new(Some(3)).apply(&mut data);
        assert_eq!(data.book, Some(3));
    }

    #[test]
    fn test_apply_without_current_book_keeps_client_value() {
        let mut data = UpdatePlace {
            book: Some(99),
            name: None,
            description: None,
        };
        ScopeContext::unscoped().apply(&mut data);
        assert_eq!(data.book, Some(99));
    }
}
