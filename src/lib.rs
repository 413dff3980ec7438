//! eHoldings coverage server
//!
//! Validation, ordering and editing of custom coverage date ranges for
//! electronic resources, packages and titles, exposed as a REST JSON API for
//! edit-form front ends.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod coverage;
pub mod error;
pub mod models;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
