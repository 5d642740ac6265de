//! Paperlink core — bibliographic data model and configuration.

pub mod config;
pub mod error;
pub mod json;
pub mod models;

pub use config::{AppConfig, DisambiguationConfig, DisplayConfig, LogConfig};
pub use error::{CoreError, ExitCode, Result};
pub use json::load_json;
pub use models::*;
