//! Book model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::scope::{Resource, ScopeColumn};

/// A novel, owned by exactly one author
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: Option<String>,
    pub summary: Option<String>,
    /// Owning user; never exposed through the API
    #[serde(skip)]
    #[sqlx(rename = "author_id")]
    pub author: i32,
    /// Path of the cover image
    pub cover: Option<String>,
    #[serde(rename = "__str__")]
    #[sqlx(skip)]
    pub label: String,
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => f.write_str(title),
            _ => write!(f, "Untitled book #{}", self.id),
        }
    }
}

impl Resource for Book {
    const NAME: &'static str = "Book";
    const TABLE: &'static str = "books";
    const SOURCE: &'static str = "books";
    const ORDER_BY: &'static str = "title";
    const SCOPE_COLUMN: ScopeColumn = ScopeColumn::Unscoped;

    fn id(&self) -> i32 {
        self.id
    }

    fn label_mut(&mut self) -> &mut String {
        &mut self.label
    }
}

/// Create book request; the author is always the requesting user
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(max = 500))]
    pub title: Option<String>,
    pub summary: Option<String>,
    pub cover: Option<String>,
}

/// Update book request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 500))]
    pub title: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub summary: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub cover: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: Option<&str>) -> Book {
        Book {
            id: 12,
            title: title.map(str::to_string),
            summary: None,
            author: 1,
            cover: None,
            label: String::new(),
        }
    }

    #[test]
    fn test_display_uses_title() {
        assert_eq!(book(Some("Dune")).to_string(), "Dune");
    }

    #[test]
    fn test_display_untitled() {
        assert_eq!(book(None).to_string(), "Untitled book #12");
        assert_eq!(book(Some("")).to_string(), "Untitled book #12");
    }

    #[test]
    fn test_author_is_not_serialized() {
        let json = serde_json::to_value(book(Some("Dune")).labelled()).unwrap();
        assert!(json.get("author").is_none());
        assert_eq!(json["__str__"], "Dune");
    }

    #[test]
    fn test_update_distinguishes_null_from_missing() {
        let update: UpdateBook = serde_json::from_str(r#"{"title": null}"#).unwrap();
        assert_eq!(update.title, Some(None));
        assert_eq!(update.summary, None);
    }
}
