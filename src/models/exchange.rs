//! Inventory exchange model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::scope::{Resource, ScopeColumn};

/// A prop changing hands during a scene, read from the `exchange_rows` view.
///
/// Exchanges belong to a scene, not directly to a book, so current-book
/// scoping does not apply to them.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct InventoryExchange {
    pub id: i32,
    #[sqlx(rename = "scene_id")]
    pub scene: i32,
    /// Giver; nulled when the character is deleted
    #[sqlx(rename = "from_char_id")]
    pub from_char: Option<i32>,
    /// Receiver; nulled when the character is deleted
    #[sqlx(rename = "to_char_id")]
    pub to_char: Option<i32>,
    #[sqlx(rename = "prop_id")]
    pub prop: i32,
    pub note: Option<String>,
    #[serde(skip)]
    pub from_char_name: Option<String>,
    #[serde(skip)]
    pub to_char_name: Option<String>,
    #[serde(skip)]
    pub prop_name: String,
    #[serde(rename = "__str__")]
    #[sqlx(skip)]
    pub label: String,
}

impl std::fmt::Display for InventoryExchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(note) = self.note.as_deref().filter(|n| !n.is_empty()) {
            return f.write_str(note);
        }
        match (self.from_char_name.as_deref(), self.to_char_name.as_deref()) {
            (Some(from), Some(to)) => write!(f, "{} receives {} from {}", to, self.prop_name, from),
            (Some(from), None) => write!(f, "{} loses {}", from, self.prop_name),
            (None, Some(to)) => write!(f, "{} receives {}", to, self.prop_name),
            (None, None) => f.write_str(&self.prop_name),
        }
    }
}

impl Resource for InventoryExchange {
    const NAME: &'static str = "InventoryExchange";
    const TABLE: &'static str = "inventory_exchanges";
    const SOURCE: &'static str = "exchange_rows";
    const ORDER_BY: &'static str = "id";
    const SCOPE_COLUMN: ScopeColumn = ScopeColumn::Unscoped;

    fn id(&self) -> i32 {
        self.id
    }

    fn label_mut(&mut self) -> &mut String {
        &mut self.label
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateExchange {
    pub scene: i32,
    pub from_char: Option<i32>,
    pub to_char: Option<i32>,
    pub prop: i32,
    #[validate(length(max = 500))]
    pub note: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateExchange {
    pub scene: Option<i32>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub from_char: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub to_char: Option<Option<i32>>,
    pub prop: Option<i32>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 500))]
    pub note: Option<Option<String>>,
}

/// References of an exchange that must share the scene's book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeLinks {
    pub scene: i32,
    pub from_char: Option<i32>,
    pub to_char: Option<i32>,
    pub prop: i32,
}

impl ExchangeLinks {
    pub fn merged(exchange: &InventoryExchange, data: &UpdateExchange) -> Self {
        Self {
            scene: data.scene.unwrap_or(exchange.scene),
            from_char: data.from_char.unwrap_or(exchange.from_char),
            to_char: data.to_char.unwrap_or(exchange.to_char),
            prop: data.prop.unwrap_or(exchange.prop),
        }
    }
}

impl From<&CreateExchange> for ExchangeLinks {
    fn from(data: &CreateExchange) -> Self {
        Self {
            scene: data.scene,
            from_char: data.from_char,
            to_char: data.to_char,
            prop: data.prop,
        }
    }
}
