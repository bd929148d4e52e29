//! QR Codes Server
//!
//! Backend of an embedded storefront admin app: merchants link QR codes to
//! products, and customers' scans are counted and redirected to the product
//! page or a prefilled cart.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
