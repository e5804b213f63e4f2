//! NaNoWriMo novel planner
//!
//! REST JSON API storing books and the chapters, places, props,
//! characters, scenes and inventory exchanges that make them up. Related
//! resources are implicitly scoped to the session's current book.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod scope;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
