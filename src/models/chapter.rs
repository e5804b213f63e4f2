//! Chapter model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::scope::{BookId, BookScopedWrite, Resource, ScopeColumn};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Chapter {
    pub id: i32,
    #[sqlx(rename = "book_id")]
    pub book: BookId,
    /// Ordering key within the book
    pub number: i16,
    pub title: Option<String>,
    pub summary: Option<String>,
    #[serde(rename = "__str__")]
    #[sqlx(skip)]
    pub label: String,
}

impl std::fmt::Display for Chapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => f.write_str(title),
            _ => write!(f, "Chapter {}", self.number),
        }
    }
}

impl Resource for Chapter {
    const NAME: &'static str = "Chapter";
    const TABLE: &'static str = "chapters";
    const SOURCE: &'static str = "chapters";
    const ORDER_BY: &'static str = "number";
    const SCOPE_COLUMN: ScopeColumn = ScopeColumn::Book;

    fn id(&self) -> i32 {
        self.id
    }

    fn label_mut(&mut self) -> &mut String {
        &mut self.label
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateChapter {
    pub book: Option<BookId>,
    #[validate(range(min = 0))]
    pub number: Option<i16>,
    #[validate(length(max = 500))]
    pub title: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateChapter {
    pub book: Option<BookId>,
    #[validate(range(min = 0))]
    pub number: Option<i16>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 500))]
    pub title: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub summary: Option<Option<String>>,
}

impl BookScopedWrite for CreateChapter {
    fn book_mut(&mut self) -> &mut Option<BookId> {
        &mut self.book
    }
}

impl BookScopedWrite for UpdateChapter {
    fn book_mut(&mut self) -> &mut Option<BookId> {
        &mut self.book
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_falls_back_to_number() {
        let chapter = Chapter {
            id: 1,
            book: 1,
            number: 4,
            title: None,
            summary: None,
            label: String::new(),
        };
        assert_eq!(chapter.to_string(), "Chapter 4");
    }

    #[test]
    fn test_negative_number_is_rejected() {
        let data = CreateChapter {
            book: None,
            number: Some(-1),
            title: None,
            summary: None,
        };
        assert!(data.validate().is_err());
    }
}
