//! Data models for the NaNoWriMo planner

pub mod book;
pub mod chapter;
pub mod character;
pub mod exchange;
pub mod place;
pub mod prop;
pub mod query;
pub mod scene;
pub mod user;

// Re-export commonly used types
pub use book::Book;
pub use chapter::Chapter;
pub use character::Character;
pub use exchange::InventoryExchange;
pub use place::Place;
pub use prop::Prop;
pub use query::{ListQuery, Page};
pub use scene::Scene;
pub use user::User;
