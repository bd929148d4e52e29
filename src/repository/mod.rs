//! Repository layer for database operations

pub mod qr_codes;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{QrCode, QrCodeInput},
};

/// Storage operations on QR code records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QrCodeStore: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<QrCode>>;

    /// Records of one shop, newest id first
    async fn list_by_shop(&self, shop: &str) -> AppResult<Vec<QrCode>>;

    async fn create(&self, shop: &str, data: &QrCodeInput) -> AppResult<QrCode>;

    /// Replace title, product and destination fields
    async fn update(&self, id: i32, data: &QrCodeInput) -> AppResult<QrCode>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Atomically add one scan; `None` when the record is gone
    async fn increment_scans(&self, id: i32) -> AppResult<Option<QrCode>>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}
