//! Character model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::scope::{BookId, BookScopedWrite, Resource, ScopeColumn};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Character {
    pub id: i32,
    #[sqlx(rename = "book_id")]
    pub book: BookId,
    pub name: String,
    pub notes: Option<String>,
    #[serde(rename = "__str__")]
    #[sqlx(skip)]
    pub label: String,
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl Resource for Character {
    const NAME: &'static str = "Character";
    const TABLE: &'static str = "characters";
    const SOURCE: &'static str = "characters";
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
pub struct CreateCharacter {
    pub book: Option<BookId>,
    #[validate(length(min = 1, max = 500))]
    pub name: String,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCharacter {
    pub book: Option<BookId>,
    #[validate(length(min = 1, max = 500))]
    pub name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

impl BookScopedWrite for CreateCharacter {
    fn book_mut(&mut self) -> &mut Option<BookId> {
        &mut self.book
    }
}

impl BookScopedWrite for UpdateCharacter {
    fn book_mut(&mut self) -> &mut Option<BookId> {
        &mut self.book
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_is_name() {
        let character = Character {
            id: 3,
            book: 1,
            name: "Paul".into(),
            notes: None,
            label: String::new(),
        }
        .labelled();
        assert_eq!(character.label, "Paul");
    }
}
