//! Place model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::scope::{BookId, BookScopedWrite, Resource, ScopeColumn};

/// A location where scenes take place
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Place {
    pub id: i32,
    #[sqlx(rename = "book_id")]
    pub book: BookId,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "__str__")]
    #[sqlx(skip)]
    pub label: String,
}

impl std::fmt::Display for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl Resource for Place {
    const NAME: &'static str = "Place";
    const TABLE: &'static str = "places";
    const SOURCE: &'static str = "places";
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
pub struct CreatePlace {
    pub book: Option<BookId>,
    #[validate(length(min = 1, max = 500))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePlace {
    pub book: Option<BookId>,
    #[validate(length(min = 1, max = 500))]
    pub name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

impl BookScopedWrite for CreatePlace {
    fn book_mut(&mut self) -> &mut Option<BookId> {
        &mut self.book
    }
}

impl BookScopedWrite for UpdatePlace {
    fn book_mut(&mut self) -> &mut Option<BookId> {
        &mut self.book
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_is_rejected() {
        let data = CreatePlace {
            book: Some(1),
            name: String::new(),
            description: None,
        };
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_update_without_name_is_valid() {
        let data: UpdatePlace = serde_json::from_str(r#"{"description": "foggy"}"#).unwrap();
        assert!(data.validate().is_ok());
        assert_eq!(data.description, Some(Some("foggy".to_string())));
    }
}
