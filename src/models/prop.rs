//! Prop model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::scope::{BookId, BookScopedWrite, Resource, ScopeColumn};

/// An object that can change hands between characters
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Prop {
    pub id: i32,
    #[sqlx(rename = "book_id")]
    pub book: BookId,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "__str__")]
    #[sqlx(skip)]
    pub label: String,
}

impl std::fmt::Display for Prop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl Resource for Prop {
    const NAME: &'static str = "Prop";
    const TABLE: &'static str = "props";
    const SOURCE: &'static str = "props";
    const ORDER_BY: &'static str = "name";
    const SCOPE_COLUMN: ScopeColumn = ScopeColumn::Book;

    fn id(&self) -> i32 {
        self.id
    }

    fn label_mut(&mut self) -> &mut String {
        &mut self.label
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProp {
    pub book: Option<BookId>,
    #[validate(length(min = 1, max = 500))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProp {
    pub book: Option<BookId>,
    #[validate(length(min = 1, max = 500))]
    pub name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

impl BookScopedWrite for CreateProp {
    fn book_mut(&mut self) -> &mut Option<BookId> {
        &mut self.book
    }
}

impl BookScopedWrite for UpdateProp {
    fn book_mut(&mut self) -> &mut Option<BookId> {
        &mut self.book
    }
}
