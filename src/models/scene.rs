//! Scene model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::scope::{BookId, BookScopedWrite, Resource, ScopeColumn};

/// A scene, read from the `scene_rows` view
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Scene {
    pub id: i32,
    #[sqlx(rename = "book_id")]
    pub book: BookId,
    pub ordernum: i16,
    pub timestamp: Option<DateTime<Utc>>,
    pub short_description: Option<String>,
    pub summary: Option<String>,
    pub long_description: Option<String>,
    /// Nulled when the chapter is deleted
    #[sqlx(rename = "chapter_id")]
    pub chapter: Option<i32>,
    /// Nulled when the place is deleted
    #[sqlx(rename = "place_id")]
    pub place: Option<i32>,
    /// Participating character ids
    pub characters: Vec<i32>,
    pub image: Option<String>,
    #[serde(skip)]
    pub place_name: Option<String>,
    #[serde(skip)]
    pub character_names: Vec<String>,
    #[serde(rename = "__str__")]
    #[sqlx(skip)]
    pub label: String,
}

impl std::fmt::Display for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let when = self
            .timestamp
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "undated".to_string());

        match self.short_description.as_deref() {
            Some(desc) if !desc.is_empty() => write!(f, "{} ({})", desc, when),
            _ => write!(
                f,
                "scene at {} with {} ({})",
                self.place_name.as_deref().unwrap_or("nowhere"),
                self.character_names.join(", "),
                when
            ),
        }
    }
}

impl Resource for Scene {
    const NAME: &'static str = "Scene";
    const TABLE: &'static str = "scenes";
    const SOURCE: &'static str = "scene_rows";
    const ORDER_BY: &'static str = "short_description";
    const SCOPE_COLUMN: ScopeColumn = ScopeColumn::Book;

    fn id(&self) -> i32 {
        self.id
    }

    fn label_mut(&mut self) -> &mut String {
        &mut self.label
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateScene {
    pub book: Option<BookId>,
    #[validate(range(min = 0))]
    pub ordernum: Option<i16>,
    pub timestamp: Option<DateTime<Utc>>,
    #[validate(length(max = 500))]
    pub short_description: Option<String>,
    pub summary: Option<String>,
    pub long_description: Option<String>,
    pub chapter: Option<i32>,
    pub place: Option<i32>,
    #[serde(default)]
    pub characters: Vec<i32>,
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateScene {
    pub book: Option<BookId>,
    #[validate(range(min = 0))]
    pub ordernum: Option<i16>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub timestamp: Option<Option<DateTime<Utc>>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 500))]
    pub short_description: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub summary: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub long_description: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub chapter: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub place: Option<Option<i32>>,
    /// Replaces the whole participant list when present
    pub characters: Option<Vec<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
}

impl BookScopedWrite for CreateScene {
    fn book_mut(&mut self) -> &mut Option<BookId> {
        &mut self.book
    }
}

impl BookScopedWrite for UpdateScene {
    fn book_mut(&mut self) -> &mut Option<BookId> {
        &mut self.book
    }
}

/// References of a scene that must live in the scene's own book
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneLinks {
    pub chapter: Option<i32>,
    pub place: Option<i32>,
    pub characters: Vec<i32>,
}

impl SceneLinks {
    /// Links after applying `data` on top of `scene`
    pub fn merged(scene: &Scene, data: &UpdateScene) -> Self {
        Self {
            chapter: data.chapter.unwrap_or(scene.chapter),
            place: data.place.unwrap_or(scene.place),
            characters: data
                .characters
                .clone()
                .unwrap_or_else(|| scene.characters.clone()),
        }
    }
}

impl From<&CreateScene> for SceneLinks {
    fn from(data: &CreateScene) -> Self {
        Self {
            chapter: data.chapter,
            place: data.place,
            characters: data.characters.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn scene() -> Scene {
        Scene {
            id: 1,
            book: 1,
            ordernum: 0,
            timestamp: None,
            short_description: None,
            summary: None,
            long_description: None,
            chapter: Some(2),
            place: Some(3),
            characters: vec![4, 5],
            image: None,
            place_name: Some("Arrakeen".into()),
            character_names: vec!["Paul".into(), "Jessica".into()],
            label: String::new(),
        }
    }

    #[test]
    fn test_display_with_short_description() {
        let mut s = scene();
        s.short_description = Some("Arrival".into());
        s.timestamp = Some(Utc.with_ymd_and_hms(2024, 11, 1, 8, 0, 0).unwrap());
        assert_eq!(s.to_string(), "Arrival (2024-11-01T08:00:00+00:00)");
    }

    #[test]
    fn test_display_without_short_description() {
        assert_eq!(
            scene().to_string(),
            "scene at Arrakeen with Paul, Jessica (undated)"
        );
    }

    #[test]
    fn test_merged_links_keep_unchanged_references() {
        let data = UpdateScene {
            place: Some(None),
            ..Default::default()
        };
        let links = SceneLinks::merged(&scene(), &data);
        assert_eq!(links.chapter, Some(2));
        assert_eq!(links.place, None);
        assert_eq!(links.characters, vec![4, 5]);
    }

    #[test]
    fn test_merged_links_replace_characters() {
        let data = UpdateScene {
            characters: Some(vec![]),
            ..Default::default()
        };
        assert!(SceneLinks::merged(&scene(), &data).characters.is_empty());
    }
}
