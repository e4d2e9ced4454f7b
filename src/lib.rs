pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod i18n;
pub mod models;
pub mod table;
pub mod toast;
pub mod ui;

pub use error::{AppError, Result};
