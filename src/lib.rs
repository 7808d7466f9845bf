// calpicker library
// Default-calendar selector: preferences, Google calendar listing and the iced view

pub mod app;
pub mod auth;
pub mod calendar;
pub mod config;
pub mod database;
pub mod error;
pub mod http_config;
pub mod messages;
pub mod models;
pub mod preferences;
pub mod selector;
pub mod surfaces;
pub mod ui;
pub mod ui_state;
pub mod utils;

// Re-export commonly used types
pub use database::Database;
pub use error::{AppError, AppResult};
pub use models::*;
pub use selector::{Collaborators, DefaultCalendarSelector, ViewState};
